//! Per-request access guard: classification, session resolution, verdict.

use async_trait::async_trait;

use super::classifier::{RouteClass, RouteClassifier};
use super::{AccessDecision, SessionContext};
use crate::config::RouteConfig;
use crate::users::{SessionRepository, UserRepository};
use crate::AccessError;

/// Resolves a request's session token into a [`SessionContext`].
///
/// Implementations are the only I/O the guard performs; the guard calls
/// `get_session` at most once per request.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn get_session(&self, token: &str) -> Result<Option<SessionContext>, AccessError>;
}

/// [`SessionProvider`] backed by the session and user repositories.
///
/// An expired session, a dangling session (user row gone), or no
/// session at all resolve to `Ok(None)`.
pub struct StoreSessionProvider<S, U>
where
    S: SessionRepository,
    U: UserRepository,
{
    session_repo: S,
    user_repo: U,
}

impl<S, U> StoreSessionProvider<S, U>
where
    S: SessionRepository,
    U: UserRepository,
{
    pub fn new(session_repo: S, user_repo: U) -> Self {
        Self {
            session_repo,
            user_repo,
        }
    }
}

#[async_trait]
impl<S, U> SessionProvider for StoreSessionProvider<S, U>
where
    S: SessionRepository,
    U: UserRepository,
{
    async fn get_session(&self, token: &str) -> Result<Option<SessionContext>, AccessError> {
        let Some(session) = self.session_repo.find(token).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            return Ok(None);
        }

        let Some(user) = self.user_repo.find_by_id(session.data.user_id).await? else {
            return Ok(None);
        };

        Ok(Some(SessionContext {
            user_id: user.id,
            is_archived: user.is_archived(),
            has_live_session: true,
        }))
    }
}

/// Composition root invoked once per incoming request.
///
/// Classifies the path first; only classifications that need session
/// evaluation trigger the single provider lookup. Provider failures are
/// treated as "no session": the request fails closed to the login
/// redirect instead of leaking store errors to unauthenticated callers.
pub struct AccessGuard<P: SessionProvider> {
    classifier: RouteClassifier,
    provider: P,
}

impl<P: SessionProvider> AccessGuard<P> {
    pub fn new(routes: RouteConfig, provider: P) -> Self {
        Self {
            classifier: RouteClassifier::new(routes),
            provider,
        }
    }

    pub fn classifier(&self) -> &RouteClassifier {
        &self.classifier
    }

    /// Decides access for a request path and optional session token.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "decide_access", skip_all)
    )]
    pub async fn decide(&self, path: &str, token: Option<&str>) -> AccessDecision {
        let class = self.classifier.classify(path);

        // public routes never touch the session store
        if class == RouteClass::Public {
            return AccessDecision::Allow;
        }

        let session = match token {
            None => None,
            Some(token) => match self.provider.get_session(token).await {
                Ok(session) => session,
                Err(e) => {
                    log::warn!(
                        target: "warden",
                        "msg=\"session lookup failed, treating as unauthenticated\", error=\"{e}\""
                    );
                    None
                }
            },
        };

        self.classifier.decide(class, session.as_ref())
    }
}
