use chrono::Utc;

use crate::events::{AccessEvent, dispatch};
use crate::orgs::{InviteRepository, Membership};
use crate::{AccessError, UserRepository};

/// Action to accept an organization invite.
///
/// This action:
/// 1. Loads the invite and the accepting user
/// 2. Rejects terminal invites and lazily expires overdue ones
/// 3. Commits the acceptance: status update + membership upsert in one
///    transaction (a concurrent accept sees exactly one winner)
///
/// Retrying after a transient fault is safe: the terminal-status guard
/// and the idempotent membership upsert make the operation converge.
pub struct AcceptInviteAction<I, U>
where
    I: InviteRepository,
    U: UserRepository,
{
    invite_repo: I,
    user_repo: U,
}

impl<I, U> AcceptInviteAction<I, U>
where
    I: InviteRepository,
    U: UserRepository,
{
    pub fn new(invite_repo: I, user_repo: U) -> Self {
        Self {
            invite_repo,
            user_repo,
        }
    }

    /// Accepts an invite on behalf of a user.
    ///
    /// # Returns
    ///
    /// - `Ok(membership)` - invite accepted, user is a member
    /// - `Err(AccessError::NotFound)` - invite or user absent
    /// - `Err(AccessError::InvalidState)` - invite is not pending
    ///   (already accepted, cancelled, or expired; or a concurrent
    ///   accept won)
    /// - `Err(AccessError::Expired)` - invite was past expiry; it has
    ///   been transitioned to expired
    /// - `Err(_)` - store errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "accept_invite", skip_all, err)
    )]
    pub async fn execute(
        &self,
        invite_id: i64,
        accepting_user_id: i64,
    ) -> Result<Membership, AccessError> {
        let invite = self
            .invite_repo
            .find_by_id(invite_id)
            .await?
            .ok_or(AccessError::NotFound)?;

        self.user_repo
            .find_by_id(accepting_user_id)
            .await?
            .ok_or(AccessError::NotFound)?;

        if !invite.is_pending() {
            return Err(AccessError::InvalidState(format!(
                "invite is {}, not pending",
                invite.status.as_str()
            )));
        }

        let now = Utc::now();
        if invite.is_expired_at(now) {
            // lazy expiry: record the transition, then report it. A
            // concurrent transition losing here is fine; the invite is
            // terminal either way.
            match self.invite_repo.mark_expired(invite.id).await {
                Ok(_) | Err(AccessError::InvalidState(_)) => {}
                Err(e) => return Err(e),
            }
            return Err(AccessError::Expired);
        }

        let (accepted, membership) = self
            .invite_repo
            .accept(invite.id, accepting_user_id, now)
            .await?;

        dispatch(AccessEvent::InviteAccepted {
            invite_id: accepted.id,
            organization_id: accepted.organization_id,
            user_id: accepting_user_id,
            at: now,
        })
        .await;

        log::info!(
            target: "warden",
            "msg=\"invite accepted\", invite_id={}, organization_id={}, user_id={accepting_user_id}",
            accepted.id,
            accepted.organization_id
        );

        Ok(membership)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::orgs::repository::CreateInvite;
    use crate::orgs::{InviteStatus, MemberRole, MockInviteRepository, MockMembershipRepository};
    use crate::users::{CreateUser, MockUserRepository};
    use crate::MembershipRepository;

    async fn seed_user(repo: &MockUserRepository, email: &str) -> i64 {
        repo.create(CreateUser {
            email: email.to_owned(),
            name: "Test User".to_owned(),
        })
        .await
        .unwrap()
        .id
    }

    fn invite_data(email: &str, expires_at: chrono::DateTime<Utc>) -> CreateInvite {
        CreateInvite {
            organization_id: 1,
            email: email.to_owned(),
            role: MemberRole::Member,
            invited_by: 1,
            expires_at: Some(expires_at),
        }
    }

    #[tokio::test]
    async fn test_accept_success() {
        let membership_repo = MockMembershipRepository::new();
        let invite_repo = MockInviteRepository::linked(&membership_repo);
        let user_repo = MockUserRepository::new();

        let user_id = seed_user(&user_repo, "invitee@example.com").await;
        let invite = invite_repo
            .create(invite_data(
                "invitee@example.com",
                Utc::now() + Duration::days(7),
            ))
            .await
            .unwrap();

        let action = AcceptInviteAction::new(invite_repo.clone(), user_repo);
        let membership = action.execute(invite.id, user_id).await.unwrap();

        assert_eq!(membership.organization_id, 1);
        assert_eq!(membership.user_id, user_id);
        assert_eq!(membership.role, MemberRole::Member);

        let accepted = invite_repo.find_by_id(invite.id).await.unwrap().unwrap();
        assert_eq!(accepted.status, InviteStatus::Accepted);
        assert!(accepted.accepted_at.is_some());
    }

    #[tokio::test]
    async fn test_accept_invite_not_found() {
        let user_repo = MockUserRepository::new();
        let user_id = seed_user(&user_repo, "invitee@example.com").await;

        let action = AcceptInviteAction::new(MockInviteRepository::new(), user_repo);
        let result = action.execute(999, user_id).await;

        assert_eq!(result.unwrap_err(), AccessError::NotFound);
    }

    #[tokio::test]
    async fn test_accept_user_not_found() {
        let invite_repo = MockInviteRepository::new();
        let invite = invite_repo
            .create(invite_data(
                "invitee@example.com",
                Utc::now() + Duration::days(7),
            ))
            .await
            .unwrap();

        let action = AcceptInviteAction::new(invite_repo, MockUserRepository::new());
        let result = action.execute(invite.id, 999).await;

        assert_eq!(result.unwrap_err(), AccessError::NotFound);
    }

    #[tokio::test]
    async fn test_accept_expired_then_invalid_state() {
        let invite_repo = MockInviteRepository::new();
        let user_repo = MockUserRepository::new();
        let user_id = seed_user(&user_repo, "invitee@example.com").await;

        let invite = invite_repo
            .create(invite_data(
                "invitee@example.com",
                Utc::now() - Duration::hours(1),
            ))
            .await
            .unwrap();

        let action = AcceptInviteAction::new(invite_repo.clone(), user_repo);

        // first attempt reports expiry and records the transition
        let first = action.execute(invite.id, user_id).await;
        assert_eq!(first.unwrap_err(), AccessError::Expired);

        let stored = invite_repo.find_by_id(invite.id).await.unwrap().unwrap();
        assert_eq!(stored.status, InviteStatus::Expired);

        // second attempt sees a terminal invite
        let second = action.execute(invite.id, user_id).await;
        assert!(matches!(second.unwrap_err(), AccessError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_accept_cancelled_invalid_state() {
        let invite_repo = MockInviteRepository::new();
        let user_repo = MockUserRepository::new();
        let user_id = seed_user(&user_repo, "invitee@example.com").await;

        let invite = invite_repo
            .create(invite_data(
                "invitee@example.com",
                Utc::now() + Duration::days(7),
            ))
            .await
            .unwrap();
        invite_repo.mark_cancelled(invite.id).await.unwrap();

        let action = AcceptInviteAction::new(invite_repo, user_repo);
        let result = action.execute(invite.id, user_id).await;

        assert!(matches!(result.unwrap_err(), AccessError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_concurrent_accept_single_winner() {
        let membership_repo = MockMembershipRepository::new();
        let invite_repo = MockInviteRepository::linked(&membership_repo);
        let user_repo = MockUserRepository::new();

        let u1 = seed_user(&user_repo, "one@example.com").await;
        let u2 = seed_user(&user_repo, "two@example.com").await;
        let invite = invite_repo
            .create(invite_data("shared@example.com", Utc::now() + Duration::days(7)))
            .await
            .unwrap();

        let action = AcceptInviteAction::new(invite_repo, user_repo);

        let (r1, r2) = tokio::join!(action.execute(invite.id, u1), action.execute(invite.id, u2));

        let winners = [&r1, &r2].iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1, "exactly one accept must win");

        let loser = if r1.is_ok() { r2 } else { r1 };
        assert!(matches!(
            loser.unwrap_err(),
            AccessError::InvalidState(_) | AccessError::Conflict(_)
        ));

        // exactly one membership row exists
        let all = membership_repo.find_by_org(1).await.unwrap();
        assert_eq!(all.len(), 1);
    }
}
