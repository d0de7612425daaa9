use chrono::Utc;

use crate::events::{AccessEvent, dispatch};
use crate::users::User;
use crate::{AccessError, UserRepository};

/// Action to restore an archived user account.
///
/// Sessions are not restored; the user must re-authenticate. Restoring
/// a user that was never archived is an idempotent no-op success.
pub struct RestoreUserAction<U: UserRepository> {
    user_repo: U,
}

impl<U: UserRepository> RestoreUserAction<U> {
    pub fn new(user_repo: U) -> Self {
        RestoreUserAction { user_repo }
    }

    /// Clears the archived flag on the target user.
    ///
    /// # Returns
    ///
    /// - `Ok(user)` - target is no longer archived (or never was)
    /// - `Err(AccessError::NotFound)` - target does not exist
    /// - `Err(_)` - store errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "restore_user", skip_all, err)
    )]
    pub async fn execute(
        &self,
        target_user_id: i64,
        acting_admin_id: i64,
    ) -> Result<User, AccessError> {
        let was_archived = self
            .user_repo
            .find_by_id(target_user_id)
            .await?
            .ok_or(AccessError::NotFound)?
            .is_archived();

        let user = self.user_repo.restore(target_user_id).await?;

        if was_archived {
            dispatch(AccessEvent::UserRestored {
                user_id: user.id,
                by: acting_admin_id,
                at: Utc::now(),
            })
            .await;

            log::info!(
                target: "warden",
                "msg=\"user restored\", user_id={}, by={acting_admin_id}",
                user.id
            );
        }

        Ok(user)
    }
}
