use chrono::Utc;

use crate::events::{AccessEvent, dispatch};
use crate::orgs::{Invite, InviteRepository};
use crate::AccessError;

/// Action to cancel a pending invite.
///
/// Cancellation is terminal; the invitee can no longer accept, and a
/// fresh invite may be issued for the same (organization, email) pair.
pub struct CancelInviteAction<I: InviteRepository> {
    invite_repo: I,
}

impl<I: InviteRepository> CancelInviteAction<I> {
    pub fn new(invite_repo: I) -> Self {
        CancelInviteAction { invite_repo }
    }

    /// Cancels a pending invite.
    ///
    /// # Returns
    ///
    /// - `Ok(invite)` - invite is now cancelled
    /// - `Err(AccessError::NotFound)` - invite does not exist
    /// - `Err(AccessError::InvalidState)` - invite is not pending
    /// - `Err(_)` - store errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "cancel_invite", skip_all, err)
    )]
    pub async fn execute(
        &self,
        invite_id: i64,
        acting_admin_id: i64,
    ) -> Result<Invite, AccessError> {
        let invite = self.invite_repo.mark_cancelled(invite_id).await?;

        dispatch(AccessEvent::InviteCancelled {
            invite_id: invite.id,
            organization_id: invite.organization_id,
            by: acting_admin_id,
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "warden",
            "msg=\"invite cancelled\", invite_id={}, organization_id={}, by={acting_admin_id}",
            invite.id,
            invite.organization_id
        );

        Ok(invite)
    }
}
