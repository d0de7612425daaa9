//! Pure route classification.
//!
//! The classifier performs no I/O: given a path and (optionally) a
//! session context, it always returns a decision. Ambiguity resolves
//! toward requiring a session, never toward allowing.

use super::{AccessDecision, SessionContext};
use crate::config::RouteConfig;

/// Access tier of a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Always allowed; no session lookup is performed.
    Public,
    /// Login/signup: only meaningful for unauthenticated visitors.
    AuthOnly,
    /// Requires an active, non-archived session. Paths matching no
    /// configured list land here (fail closed).
    Protected,
}

/// Stateless path-to-tier classifier plus decision table.
///
/// Holds an immutable [`RouteConfig`] injected at construction.
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    config: RouteConfig,
}

impl RouteClassifier {
    pub fn new(config: RouteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Classifies a path into its access tier.
    ///
    /// A leading two-letter locale segment is stripped before matching,
    /// so `/en/organizations` classifies like `/organizations`.
    pub fn classify(&self, path: &str) -> RouteClass {
        let path = strip_locale(path);

        if self
            .config
            .public_prefixes
            .iter()
            .any(|p| prefix_matches(path, p))
        {
            return RouteClass::Public;
        }

        if self.config.auth_paths.iter().any(|p| p == path) {
            return RouteClass::AuthOnly;
        }

        if !self
            .config
            .protected_prefixes
            .iter()
            .any(|p| prefix_matches(path, p))
        {
            // default-deny: unmatched paths are never implicitly public
            log::debug!(
                target: "warden",
                "msg=\"unmatched path treated as protected\", path=\"{path}\""
            );
        }

        RouteClass::Protected
    }

    /// Applies the decision table for a classification and session state.
    ///
    /// Never errors; any ambiguity collapses to redirect-to-login or
    /// deny.
    pub fn decide(
        &self,
        class: RouteClass,
        session: Option<&SessionContext>,
    ) -> AccessDecision {
        match class {
            RouteClass::Public => AccessDecision::Allow,
            RouteClass::AuthOnly => match session {
                // an authenticated visitor has no business on the login page
                Some(ctx) if ctx.is_active() => {
                    AccessDecision::Redirect(self.config.home_path.clone())
                }
                _ => AccessDecision::Allow,
            },
            RouteClass::Protected => match session {
                Some(ctx) if ctx.is_active() => AccessDecision::Allow,
                // positive knowledge of an archived principal: refuse
                // outright rather than bouncing through login
                Some(ctx) if ctx.is_archived => AccessDecision::Deny(403),
                _ => AccessDecision::Redirect(self.config.login_path.clone()),
            },
        }
    }
}

/// Strips a leading `/xx/` locale segment when `xx` is two ASCII letters.
fn strip_locale(path: &str) -> &str {
    let Some(rest) = path.strip_prefix('/') else {
        return path;
    };

    let segment = rest.split('/').next().unwrap_or("");
    if segment.len() == 2 && segment.chars().all(|c| c.is_ascii_alphabetic()) {
        let stripped = &rest[segment.len()..];
        if stripped.is_empty() { "/" } else { stripped }
    } else {
        path
    }
}

/// Prefix match on path-segment boundaries: `/api` matches `/api` and
/// `/api/v1`, not `/apiary`.
fn prefix_matches(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}
