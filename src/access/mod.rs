//! Route classification and the per-request access guard.

mod classifier;
mod guard;

pub use classifier::{RouteClass, RouteClassifier};
pub use guard::{AccessGuard, SessionProvider, StoreSessionProvider};

use serde::{Deserialize, Serialize};

/// Everything the guard needs to know about an authenticated principal.
///
/// Built by a [`SessionProvider`] from the session store; loosely-shaped
/// request objects stop at this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: i64,
    pub is_archived: bool,
    pub has_live_session: bool,
}

impl SessionContext {
    /// True when the principal may act on protected routes.
    pub fn is_active(&self) -> bool {
        !self.is_archived && self.has_live_session
    }
}

/// The guard's verdict for a request.
///
/// Only the verdict crosses the boundary; error details never do, so an
/// unauthenticated caller cannot probe session validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessDecision {
    /// Let the request through to its handler.
    Allow,
    /// Send the client elsewhere (login page, authenticated landing).
    Redirect(String),
    /// Refuse with a status code.
    Deny(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_context_is_active() {
        let active = SessionContext {
            user_id: 1,
            is_archived: false,
            has_live_session: true,
        };
        assert!(active.is_active());

        let archived = SessionContext {
            is_archived: true,
            ..active.clone()
        };
        assert!(!archived.is_active());

        let logged_out = SessionContext {
            has_live_session: false,
            ..active
        };
        assert!(!logged_out.is_active());
    }
}
