//! Configuration types for the warden access-control core.
//!
//! Route tables are process-wide static configuration: build a
//! [`RouteConfig`] once at startup and hand it to the classifier.
//! They are never mutated after construction.
//!
//! # Example
//!
//! ```rust
//! use warden::config::{WardenConfig, InviteConfig, RouteConfig};
//!
//! // Use defaults
//! let config = WardenConfig::default();
//!
//! // Or customize
//! let config = WardenConfig {
//!     invites: InviteConfig { expiry_days: 14 },
//!     routes: RouteConfig {
//!         login_path: "/signin".to_owned(),
//!         ..RouteConfig::default()
//!     },
//! };
//! ```

/// Main configuration struct for the warden core.
#[derive(Debug, Clone, Default)]
pub struct WardenConfig {
    /// Route classification tables.
    pub routes: RouteConfig,

    /// Invitation settings.
    pub invites: InviteConfig,
}

impl WardenConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Configuration for organization invitations.
#[derive(Debug, Clone)]
pub struct InviteConfig {
    /// Number of days until a new invite expires. Default: 7
    pub expiry_days: i64,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self { expiry_days: 7 }
    }
}

/// Route tables consumed by the [`RouteClassifier`](crate::RouteClassifier).
///
/// Paths are matched after stripping a leading two-letter locale segment,
/// so `/en/organizations` matches the `/organizations` prefix.
///
/// Any path matching none of the lists is treated as protected. The
/// `protected_prefixes` list therefore documents the known protected
/// surface rather than gating it.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Prefixes that never require a session (static assets, API namespace).
    pub public_prefixes: Vec<String>,

    /// Exact paths that only make sense for unauthenticated visitors
    /// (login, signup). An authenticated visitor is redirected home.
    pub auth_paths: Vec<String>,

    /// Known protected prefixes.
    pub protected_prefixes: Vec<String>,

    /// Where unauthenticated requests to protected routes are sent.
    pub login_path: String,

    /// Where authenticated visitors to auth-only routes are sent.
    pub home_path: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            public_prefixes: vec![
                "/api".to_owned(),
                "/assets".to_owned(),
                "/static".to_owned(),
                "/favicon.ico".to_owned(),
            ],
            auth_paths: vec!["/login".to_owned(), "/signup".to_owned()],
            protected_prefixes: vec![
                "/dashboard".to_owned(),
                "/organizations".to_owned(),
                "/settings".to_owned(),
            ],
            login_path: "/login".to_owned(),
            home_path: "/dashboard".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WardenConfig::default();

        assert_eq!(config.invites.expiry_days, 7);
        assert_eq!(config.routes.login_path, "/login");
        assert_eq!(config.routes.home_path, "/dashboard");
        assert!(config.routes.public_prefixes.contains(&"/api".to_owned()));
        assert!(config.routes.auth_paths.contains(&"/signup".to_owned()));
    }
}
