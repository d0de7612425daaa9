use chrono::Utc;

use crate::events::{AccessEvent, dispatch};
use crate::{AccessError, SessionRepository, UserRepository};

/// Action to suspend a user by force-logout.
///
/// Suspension deletes every session owned by the target without
/// touching the archived flag; the persisted model does not distinguish
/// a suspended user from one who logged out. The `user.suspended` event
/// carries the administrative intent for audit listeners.
pub struct SuspendUserAction<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: U,
    session_repo: S,
}

impl<U, S> SuspendUserAction<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: U, session_repo: S) -> Self {
        SuspendUserAction {
            user_repo,
            session_repo,
        }
    }

    /// Destroys all sessions owned by the target user.
    ///
    /// Idempotent: suspending a user with no sessions succeeds with 0.
    ///
    /// # Returns
    ///
    /// - `Ok(revoked)` - number of sessions destroyed
    /// - `Err(AccessError::Forbidden)` - admin tried to suspend themselves
    /// - `Err(AccessError::NotFound)` - target does not exist
    /// - `Err(_)` - store errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "suspend_user", skip_all, err)
    )]
    pub async fn execute(
        &self,
        target_user_id: i64,
        acting_admin_id: i64,
    ) -> Result<u64, AccessError> {
        if target_user_id == acting_admin_id {
            return Err(AccessError::Forbidden(
                "cannot suspend own account".to_owned(),
            ));
        }

        self.user_repo
            .find_by_id(target_user_id)
            .await?
            .ok_or(AccessError::NotFound)?;

        let revoked = self
            .session_repo
            .destroy_user_sessions(target_user_id)
            .await?;

        dispatch(AccessEvent::UserSuspended {
            user_id: target_user_id,
            by: acting_admin_id,
            sessions_revoked: revoked,
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "warden",
            "msg=\"user suspended\", user_id={target_user_id}, by={acting_admin_id}, sessions_revoked={revoked}"
        );

        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::users::{CreateUser, MockSessionRepository, MockUserRepository, SessionData, User};

    async fn seed_user(repo: &MockUserRepository, email: &str) -> User {
        repo.create(CreateUser {
            email: email.to_owned(),
            name: "Test User".to_owned(),
        })
        .await
        .unwrap()
    }

    fn session_data(user_id: i64) -> SessionData {
        SessionData {
            user_id,
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::hours(2),
        }
    }

    #[tokio::test]
    async fn test_suspend_destroys_sessions() {
        let session_repo = MockSessionRepository::new();
        let user_repo = MockUserRepository::linked(&session_repo);
        let user = seed_user(&user_repo, "target@example.com").await;

        session_repo.create(session_data(user.id)).await.unwrap();
        session_repo.create(session_data(user.id)).await.unwrap();

        let action = SuspendUserAction::new(user_repo.clone(), session_repo.clone());
        let revoked = action.execute(user.id, 999).await.unwrap();

        assert_eq!(revoked, 2);
        assert_eq!(session_repo.count_user_sessions(user.id).await.unwrap(), 0);

        // archived flag untouched
        let unchanged = user_repo.find_by_id(user.id).await.unwrap().unwrap();
        assert!(!unchanged.is_archived());
    }

    #[tokio::test]
    async fn test_suspend_no_sessions_is_idempotent() {
        let session_repo = MockSessionRepository::new();
        let user_repo = MockUserRepository::linked(&session_repo);
        let user = seed_user(&user_repo, "target@example.com").await;

        let action = SuspendUserAction::new(user_repo, session_repo);

        assert_eq!(action.execute(user.id, 999).await.unwrap(), 0);
        assert_eq!(action.execute(user.id, 999).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_suspend_self_forbidden() {
        let session_repo = MockSessionRepository::new();
        let user_repo = MockUserRepository::linked(&session_repo);
        let user = seed_user(&user_repo, "admin@example.com").await;
        session_repo.create(session_data(user.id)).await.unwrap();

        let action = SuspendUserAction::new(user_repo, session_repo.clone());
        let result = action.execute(user.id, user.id).await;

        assert!(matches!(result.unwrap_err(), AccessError::Forbidden(_)));
        // no state change
        assert_eq!(session_repo.count_user_sessions(user.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_suspend_not_found() {
        let action = SuspendUserAction::new(MockUserRepository::new(), MockSessionRepository::new());
        let result = action.execute(999, 1).await;

        assert_eq!(result.unwrap_err(), AccessError::NotFound);
    }
}
