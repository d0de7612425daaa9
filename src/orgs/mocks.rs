#![allow(clippy::significant_drop_tightening)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::repository::{
    CreateInvite, CreateOrganization, InviteRepository, MembershipRepository,
    OrganizationRepository,
};
use super::types::{Invite, InviteStatus, Membership, Organization};
use crate::AccessError;

type MembershipMap = Arc<RwLock<HashMap<i64, Membership>>>;

#[derive(Clone)]
pub struct MockOrganizationRepository {
    orgs: Arc<RwLock<HashMap<i64, Organization>>>,
    next_id: Arc<AtomicI64>,
}

impl MockOrganizationRepository {
    pub fn new() -> Self {
        Self {
            orgs: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for MockOrganizationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrganizationRepository for MockOrganizationRepository {
    async fn create(&self, data: CreateOrganization) -> Result<Organization, AccessError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let org = Organization {
            id,
            name: data.name,
            created_at: Utc::now(),
        };

        let mut orgs = self
            .orgs
            .write()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;
        orgs.insert(id, org.clone());

        Ok(org)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Organization>, AccessError> {
        let orgs = self
            .orgs
            .read()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;
        Ok(orgs.get(&id).cloned())
    }
}

#[derive(Clone)]
pub struct MockMembershipRepository {
    memberships: MembershipMap,
    next_id: Arc<AtomicI64>,
}

impl MockMembershipRepository {
    pub fn new() -> Self {
        Self {
            memberships: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for MockMembershipRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MembershipRepository for MockMembershipRepository {
    async fn find_by_org_and_user(
        &self,
        organization_id: i64,
        user_id: i64,
    ) -> Result<Option<Membership>, AccessError> {
        let memberships = self
            .memberships
            .read()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;
        Ok(memberships
            .values()
            .find(|m| m.organization_id == organization_id && m.user_id == user_id)
            .cloned())
    }

    async fn find_by_org(&self, organization_id: i64) -> Result<Vec<Membership>, AccessError> {
        let memberships = self
            .memberships
            .read()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;
        Ok(memberships
            .values()
            .filter(|m| m.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Membership>, AccessError> {
        let memberships = self
            .memberships
            .read()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;
        Ok(memberships
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// In-memory invite storage.
///
/// Construct with [`MockInviteRepository::linked`] so `accept` writes
/// the membership into the same map a [`MockMembershipRepository`]
/// reads, the way a transactional backend shares tables.
#[derive(Clone)]
pub struct MockInviteRepository {
    invites: Arc<RwLock<HashMap<i64, Invite>>>,
    next_id: Arc<AtomicI64>,
    memberships: MembershipMap,
    next_membership_id: Arc<AtomicI64>,
}

impl MockInviteRepository {
    pub fn new() -> Self {
        Self {
            invites: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            memberships: Arc::new(RwLock::new(HashMap::new())),
            next_membership_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Creates an invite repository sharing membership state with
    /// `memberships`.
    pub fn linked(memberships: &MockMembershipRepository) -> Self {
        Self {
            invites: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            memberships: Arc::clone(&memberships.memberships),
            next_membership_id: Arc::clone(&memberships.next_id),
        }
    }
}

impl Default for MockInviteRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InviteRepository for MockInviteRepository {
    async fn create(&self, data: CreateInvite) -> Result<Invite, AccessError> {
        let mut invites = self
            .invites
            .write()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;

        // uniqueness constraint on (organization, email, status=pending)
        let duplicate = invites.values().any(|i| {
            i.organization_id == data.organization_id
                && i.email == data.email
                && i.status == InviteStatus::Pending
        });
        if duplicate {
            return Err(AccessError::Conflict(format!(
                "a pending invite already exists for {} in organization {}",
                data.email, data.organization_id
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let invite = Invite {
            id,
            organization_id: data.organization_id,
            email: data.email,
            role: data.role,
            status: InviteStatus::Pending,
            invited_by: data.invited_by,
            expires_at: data.expires_at,
            accepted_at: None,
            created_at: Utc::now(),
        };
        invites.insert(id, invite.clone());

        Ok(invite)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Invite>, AccessError> {
        let invites = self
            .invites
            .read()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;
        Ok(invites.get(&id).cloned())
    }

    async fn find_pending(
        &self,
        organization_id: i64,
        email: &str,
    ) -> Result<Option<Invite>, AccessError> {
        let invites = self
            .invites
            .read()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;
        Ok(invites
            .values()
            .find(|i| {
                i.organization_id == organization_id
                    && i.email == email
                    && i.status == InviteStatus::Pending
            })
            .cloned())
    }

    async fn mark_cancelled(&self, id: i64) -> Result<Invite, AccessError> {
        self.transition(id, InviteStatus::Cancelled)
    }

    async fn mark_expired(&self, id: i64) -> Result<Invite, AccessError> {
        self.transition(id, InviteStatus::Expired)
    }

    async fn accept(
        &self,
        id: i64,
        accepting_user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<(Invite, Membership), AccessError> {
        // The invite lock is held across the membership upsert so the
        // compound write is observed all-or-nothing, mirroring a
        // transaction over both tables.
        let mut invites = self
            .invites
            .write()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;

        let invite = invites.get_mut(&id).ok_or(AccessError::NotFound)?;
        if invite.status != InviteStatus::Pending {
            return Err(AccessError::InvalidState(format!(
                "invite is {}, not pending",
                invite.status.as_str()
            )));
        }

        invite.status = InviteStatus::Accepted;
        invite.accepted_at = Some(now);
        let accepted = invite.clone();

        let mut memberships = self
            .memberships
            .write()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;

        let existing = memberships
            .values()
            .find(|m| {
                m.organization_id == accepted.organization_id && m.user_id == accepting_user_id
            })
            .cloned();

        let membership = match existing {
            // idempotent upsert: an existing row wins, whatever its role
            Some(m) => m,
            None => {
                let membership_id = self.next_membership_id.fetch_add(1, Ordering::SeqCst);
                let membership = Membership {
                    id: membership_id,
                    organization_id: accepted.organization_id,
                    user_id: accepting_user_id,
                    role: accepted.role,
                    created_at: now,
                    updated_at: now,
                };
                memberships.insert(membership_id, membership.clone());
                membership
            }
        };

        Ok((accepted, membership))
    }

    async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<u64, AccessError> {
        let mut invites = self
            .invites
            .write()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;

        let mut expired = 0u64;
        for invite in invites.values_mut() {
            if invite.status == InviteStatus::Pending && invite.is_expired_at(now) {
                invite.status = InviteStatus::Expired;
                expired += 1;
            }
        }

        Ok(expired)
    }
}

impl MockInviteRepository {
    fn transition(&self, id: i64, to: InviteStatus) -> Result<Invite, AccessError> {
        let mut invites = self
            .invites
            .write()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;

        let invite = invites.get_mut(&id).ok_or(AccessError::NotFound)?;
        if invite.status != InviteStatus::Pending {
            return Err(AccessError::InvalidState(format!(
                "invite is {}, not pending",
                invite.status.as_str()
            )));
        }

        invite.status = to;
        Ok(invite.clone())
    }
}
