use chrono::{Duration, Utc};

use crate::config::InviteConfig;
use crate::events::{AccessEvent, dispatch};
use crate::orgs::{Invite, InviteRepository, MemberRole, OrganizationRepository};
use crate::orgs::repository::CreateInvite;
use crate::AccessError;

/// Input data for creating an organization invite.
#[derive(Debug, Clone)]
pub struct CreateInviteInput {
    pub organization_id: i64,
    pub email: String,
    pub role: MemberRole,
    pub invited_by: i64,
}

/// Action to invite a user to an organization.
///
/// This action:
/// 1. Validates the organization exists
/// 2. Creates the pending invite (one pending invite per (org, email))
/// 3. Fires `invite.created` for notification delivery
///
/// Notification delivery (email content, templates) is external; hook a
/// listener onto the `invite.created` event.
pub struct CreateInviteAction<O, I>
where
    O: OrganizationRepository,
    I: InviteRepository,
{
    org_repo: O,
    invite_repo: I,
    config: InviteConfig,
}

impl<O: OrganizationRepository, I: InviteRepository> CreateInviteAction<O, I> {
    /// Creates a new `CreateInviteAction` with default configuration.
    pub fn new(org_repo: O, invite_repo: I) -> Self {
        Self {
            org_repo,
            invite_repo,
            config: InviteConfig::default(),
        }
    }

    /// Creates a new `CreateInviteAction` with custom configuration.
    pub fn with_config(org_repo: O, invite_repo: I, config: InviteConfig) -> Self {
        Self {
            org_repo,
            invite_repo,
            config,
        }
    }

    /// Creates a pending invite.
    ///
    /// # Returns
    ///
    /// - `Ok(invite)` - invite created in pending status
    /// - `Err(AccessError::NotFound)` - organization does not exist
    /// - `Err(AccessError::Conflict)` - a pending invite already exists
    ///   for this (organization, email) pair
    /// - `Err(_)` - store errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_invite", skip_all, err)
    )]
    pub async fn execute(&self, input: CreateInviteInput) -> Result<Invite, AccessError> {
        self.org_repo
            .find_by_id(input.organization_id)
            .await?
            .ok_or(AccessError::NotFound)?;

        let expires_at = Utc::now() + Duration::days(self.config.expiry_days);

        let invite = self
            .invite_repo
            .create(CreateInvite {
                organization_id: input.organization_id,
                email: input.email,
                role: input.role,
                invited_by: input.invited_by,
                expires_at: Some(expires_at),
            })
            .await?;

        dispatch(AccessEvent::InviteCreated {
            invite_id: invite.id,
            organization_id: invite.organization_id,
            email: invite.email.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "warden",
            "msg=\"invite created\", invite_id={}, organization_id={}, email=\"{}\"",
            invite.id,
            invite.organization_id,
            invite.email
        );

        Ok(invite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orgs::{CreateOrganization, MockInviteRepository, MockOrganizationRepository};

    async fn setup() -> (MockOrganizationRepository, MockInviteRepository, i64) {
        let org_repo = MockOrganizationRepository::new();
        let invite_repo = MockInviteRepository::new();
        let org = org_repo
            .create(CreateOrganization {
                name: "Acme".to_owned(),
            })
            .await
            .unwrap();
        (org_repo, invite_repo, org.id)
    }

    fn input(organization_id: i64, email: &str) -> CreateInviteInput {
        CreateInviteInput {
            organization_id,
            email: email.to_owned(),
            role: MemberRole::Member,
            invited_by: 1,
        }
    }

    #[tokio::test]
    async fn test_create_invite_success() {
        let (org_repo, invite_repo, org_id) = setup().await;
        let action = CreateInviteAction::new(org_repo, invite_repo);

        let invite = action
            .execute(input(org_id, "invitee@example.com"))
            .await
            .unwrap();

        assert!(invite.is_pending());
        assert_eq!(invite.email, "invitee@example.com");
        assert!(invite.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_create_invite_org_not_found() {
        let action = CreateInviteAction::new(
            MockOrganizationRepository::new(),
            MockInviteRepository::new(),
        );

        let result = action.execute(input(999, "invitee@example.com")).await;
        assert_eq!(result.unwrap_err(), AccessError::NotFound);
    }

    #[tokio::test]
    async fn test_create_invite_duplicate_pending_conflict() {
        let (org_repo, invite_repo, org_id) = setup().await;
        let action = CreateInviteAction::new(org_repo, invite_repo);

        action
            .execute(input(org_id, "invitee@example.com"))
            .await
            .unwrap();

        let result = action.execute(input(org_id, "invitee@example.com")).await;
        assert!(matches!(result.unwrap_err(), AccessError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_invite_custom_expiry() {
        let (org_repo, invite_repo, org_id) = setup().await;
        let config = InviteConfig { expiry_days: 14 };
        let action = CreateInviteAction::with_config(org_repo, invite_repo, config);

        let invite = action
            .execute(input(org_id, "invitee@example.com"))
            .await
            .unwrap();

        let expected = Utc::now() + Duration::days(14);
        let diff = (invite.expires_at.unwrap() - expected).num_seconds().abs();
        assert!(diff < 5, "expiry should be ~14 days from now");
    }
}
