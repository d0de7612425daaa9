use chrono::Utc;

use crate::events::{AccessEvent, dispatch};
use crate::users::User;
use crate::{AccessError, UserRepository};

/// Action to archive a user account.
///
/// Archiving sets the archived flag and deletes every session owned by
/// the target in one transaction, so an archived user cannot keep acting
/// on a session issued earlier. Reversible only by an administrator via
/// [`RestoreUserAction`](super::RestoreUserAction).
pub struct ArchiveUserAction<U: UserRepository> {
    user_repo: U,
}

impl<U: UserRepository> ArchiveUserAction<U> {
    pub fn new(user_repo: U) -> Self {
        ArchiveUserAction { user_repo }
    }

    /// Archives the target user.
    ///
    /// # Returns
    ///
    /// - `Ok(user)` - archived, all sessions revoked
    /// - `Err(AccessError::Forbidden)` - admin tried to archive themselves
    /// - `Err(AccessError::NotFound)` - target does not exist
    /// - `Err(_)` - store errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "archive_user", skip_all, err)
    )]
    pub async fn execute(
        &self,
        target_user_id: i64,
        acting_admin_id: i64,
    ) -> Result<User, AccessError> {
        if target_user_id == acting_admin_id {
            return Err(AccessError::Forbidden(
                "cannot archive own account".to_owned(),
            ));
        }

        let user = self.user_repo.archive(target_user_id).await?;

        dispatch(AccessEvent::UserArchived {
            user_id: user.id,
            by: acting_admin_id,
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "warden",
            "msg=\"user archived\", user_id={}, by={acting_admin_id}",
            user.id
        );

        Ok(user)
    }
}
