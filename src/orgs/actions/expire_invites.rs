use chrono::Utc;

use crate::orgs::InviteRepository;
use crate::AccessError;

/// Action to sweep overdue pending invites to expired.
///
/// The core never schedules this itself; expiry is evaluated lazily at
/// accept time. Deployments that want tidy listings can run this
/// periodically; it applies the same pending -> expired transition rule.
pub struct ExpireInvitesAction<I: InviteRepository> {
    invite_repo: I,
}

impl<I: InviteRepository> ExpireInvitesAction<I> {
    pub fn new(invite_repo: I) -> Self {
        ExpireInvitesAction { invite_repo }
    }

    /// Expires every pending invite whose expiry is in the past.
    ///
    /// Returns the number of invites transitioned.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "expire_invites", skip_all, err)
    )]
    pub async fn execute(&self) -> Result<u64, AccessError> {
        let expired = self.invite_repo.expire_overdue(Utc::now()).await?;

        if expired > 0 {
            log::info!(
                target: "warden",
                "msg=\"pending invites expired\", count={expired}"
            );
        }

        Ok(expired)
    }
}
