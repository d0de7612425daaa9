//! Repository traits for organizations, memberships, and invites.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::types::{Invite, MemberRole, Membership, Organization};
use crate::AccessError;

#[derive(Debug, Clone)]
pub struct CreateOrganization {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CreateInvite {
    pub organization_id: i64,
    pub email: String,
    pub role: MemberRole,
    pub invited_by: i64,
    pub expires_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn create(&self, data: CreateOrganization) -> Result<Organization, AccessError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Organization>, AccessError>;
}

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn find_by_org_and_user(
        &self,
        organization_id: i64,
        user_id: i64,
    ) -> Result<Option<Membership>, AccessError>;
    async fn find_by_org(&self, organization_id: i64) -> Result<Vec<Membership>, AccessError>;
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Membership>, AccessError>;
}

/// Repository for organization invites.
///
/// Implementations enforce the pending-uniqueness rule on create (at
/// most one pending invite per (organization, email)) and make `accept`
/// a single transaction, so two concurrent accepts see exactly one
/// winner; the loser observes `InvalidState`.
#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Creates a pending invite.
    ///
    /// Fails with `Conflict` when a pending invite already exists for
    /// the same (organization, email) pair.
    async fn create(&self, data: CreateInvite) -> Result<Invite, AccessError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Invite>, AccessError>;

    /// Finds the pending invite for an (organization, email) pair, if any.
    async fn find_pending(
        &self,
        organization_id: i64,
        email: &str,
    ) -> Result<Option<Invite>, AccessError>;

    /// Transitions `Pending -> Cancelled`.
    ///
    /// Fails with `InvalidState` when the invite is not pending.
    async fn mark_cancelled(&self, id: i64) -> Result<Invite, AccessError>;

    /// Transitions `Pending -> Expired`.
    ///
    /// Fails with `InvalidState` when the invite is not pending.
    async fn mark_expired(&self, id: i64) -> Result<Invite, AccessError>;

    /// Atomically transitions `Pending -> Accepted` and upserts the
    /// membership for (accepting user, organization) with the invite's
    /// role. Either both writes land or neither is visible.
    ///
    /// The upsert is idempotent: an existing membership is left
    /// untouched, never duplicated or overwritten.
    ///
    /// Fails with `InvalidState` when the invite is no longer pending
    /// (including when a concurrent accept won the race).
    async fn accept(
        &self,
        id: i64,
        accepting_user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<(Invite, Membership), AccessError>;

    /// Applies the pending -> expired transition to every pending invite
    /// whose expiry is before `now`. Returns the number transitioned.
    ///
    /// Optional sweep support; lazy evaluation at accept time remains
    /// the correctness mechanism.
    async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<u64, AccessError>;
}
