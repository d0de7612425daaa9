pub mod access;
pub mod admin;
pub mod config;
pub mod crypto;
pub mod events;
pub mod orgs;
pub mod users;

pub use access::{
    AccessDecision, AccessGuard, RouteClass, RouteClassifier, SessionContext, SessionProvider,
    StoreSessionProvider,
};
pub use admin::AdminResponse;
pub use config::{InviteConfig, RouteConfig, WardenConfig};
pub use events::register_event_listeners;
pub use orgs::{
    Invite, InviteRepository, InviteStatus, MemberRole, Membership, MembershipRepository,
    Organization, OrganizationRepository,
};
pub use users::{Session, SessionData, SessionRepository, User, UserRepository};

#[cfg(any(test, feature = "mocks"))]
pub use orgs::{MockInviteRepository, MockMembershipRepository, MockOrganizationRepository};
#[cfg(any(test, feature = "mocks"))]
pub use users::{MockSessionRepository, MockUserRepository};

use std::fmt;

/// Errors surfaced by lifecycle operations and the access guard.
///
/// Repository implementations translate raw store faults into
/// `AccessError::Store`; callers never see backend-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// A referenced entity does not exist.
    NotFound,
    /// A transition was attempted from a non-eligible state.
    InvalidState(String),
    /// The invite is past its expiry time.
    Expired,
    /// A duplicate pending invite, or a race lost to a concurrent winner.
    Conflict(String),
    /// Self-archive/self-suspend, or a missing administrative capability.
    Forbidden(String),
    /// No valid session where one is required.
    Unauthenticated,
    /// Persistence failure. Transient; idempotent operations may be retried.
    Store(String),
}

impl AccessError {
    /// Stable taxonomy name for the administrative boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            AccessError::NotFound => "not_found",
            AccessError::InvalidState(_) => "invalid_state",
            AccessError::Expired => "expired",
            AccessError::Conflict(_) => "conflict",
            AccessError::Forbidden(_) => "forbidden",
            AccessError::Unauthenticated => "unauthenticated",
            AccessError::Store(_) => "store",
        }
    }
}

impl std::error::Error for AccessError {}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::NotFound => write!(f, "entity not found"),
            AccessError::InvalidState(msg) => write!(f, "{msg}"),
            AccessError::Expired => write!(f, "invite has expired"),
            AccessError::Conflict(msg) => write!(f, "{msg}"),
            AccessError::Forbidden(msg) => write!(f, "{msg}"),
            AccessError::Unauthenticated => write!(f, "authentication required"),
            AccessError::Store(msg) => write!(f, "store error: {msg}"),
        }
    }
}
