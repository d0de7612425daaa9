//! Core types for organizations and invitations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An organization is the tenant unit that groups users together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier.
    pub id: i64,
    /// Human-readable organization name.
    pub name: String,
    /// When the organization was created.
    pub created_at: DateTime<Utc>,
}

/// Role held by a member within an organization.
///
/// Ordering follows privilege: `Member < Admin < Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Member,
    Admin,
    Owner,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "member" => Some(Self::Member),
            "admin" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }
}

/// A confirmed association between a user and an organization.
///
/// At most one membership exists per (user, organization) pair; rows are
/// created only by successful invite acceptance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    /// Unique identifier.
    pub id: i64,
    /// The organization this membership belongs to.
    pub organization_id: i64,
    /// The user who is a member.
    pub user_id: i64,
    /// The member's role.
    pub role: MemberRole,
    /// When the user joined.
    pub created_at: DateTime<Utc>,
    /// When the membership was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Status of an organization invite.
///
/// Transitions are monotonic: `Pending` may move to any of the other
/// three; once there, the record is terminal and immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Cancelled,
    Expired,
}

impl InviteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }

    /// True once the status can never change again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A record proposing that a user join an organization with a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    /// Unique identifier.
    pub id: i64,
    /// The organization being invited to.
    pub organization_id: i64,
    /// Email of the invitee.
    pub email: String,
    /// Role to assign when accepted.
    pub role: MemberRole,
    /// Lifecycle status.
    pub status: InviteStatus,
    /// User ID of who sent the invite.
    pub invited_by: i64,
    /// When the invite expires, if it does.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the invite was accepted (if accepted).
    pub accepted_at: Option<DateTime<Utc>>,
    /// When the invite was created.
    pub created_at: DateTime<Utc>,
}

impl Invite {
    /// Check whether the invite is past its expiry time.
    ///
    /// Expiry is evaluated lazily at read/accept time; there is no
    /// background sweep requirement.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e < now)
    }

    pub fn is_pending(&self) -> bool {
        self.status == InviteStatus::Pending
    }
}
