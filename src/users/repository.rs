//! Repository traits for users and sessions.

use async_trait::async_trait;

use super::{CreateUser, Session, SessionData, User};
use crate::AccessError;

/// Repository for user accounts.
///
/// `archive` is a compound write: implementations must set the archived
/// flag and delete every session owned by the user in a single
/// transaction. A half-applied archive (flag set, sessions still live)
/// would let an archived user keep acting.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, data: CreateUser) -> Result<User, AccessError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AccessError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccessError>;

    /// Sets `archived_at` and deletes all of the user's sessions,
    /// atomically. Archiving an already-archived user keeps the original
    /// `archived_at`.
    async fn archive(&self, id: i64) -> Result<User, AccessError>;

    /// Clears `archived_at`. Sessions are not restored; the user must
    /// re-authenticate. Restoring a non-archived user is a no-op.
    async fn restore(&self, id: i64) -> Result<User, AccessError>;
}

/// Repository for session storage.
///
/// Sessions are created by the external authentication flow and
/// destroyed in bulk by suspend/archive operations.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Creates a new session and returns it with a generated ID.
    async fn create(&self, data: SessionData) -> Result<Session, AccessError>;

    /// Finds a session by its ID.
    async fn find(&self, session_id: &str) -> Result<Option<Session>, AccessError>;

    /// Destroys a single session (logout).
    async fn destroy(&self, session_id: &str) -> Result<(), AccessError>;

    /// Destroys all sessions owned by a user.
    ///
    /// Returns the number of sessions destroyed. Succeeds with 0 when
    /// the user holds no sessions.
    async fn destroy_user_sessions(&self, user_id: i64) -> Result<u64, AccessError>;

    /// Number of live sessions owned by a user.
    async fn count_user_sessions(&self, user_id: i64) -> Result<u64, AccessError>;
}
