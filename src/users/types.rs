//! Core types for user accounts and sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account.
///
/// "Archived" is the only persisted deactivation flag. Suspension is
/// derived: a user with zero live sessions and `archived_at` unset is
/// indistinguishable from one who logged out; administrative intent is
/// recorded through the event bus instead of a column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: i64,
    /// Unique email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// When the account was archived, if it is.
    pub archived_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// True when the account has been archived by an administrator.
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

/// Input data for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
}

/// The payload stored for an authenticated login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    /// The user this session belongs to.
    pub user_id: i64,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
}

/// A server-side session record. Its presence is the sole signal of
/// "logged in".
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub data: SessionData,
}

impl Session {
    pub fn new(id: String, data: SessionData) -> Self {
        Self { id, data }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.data.expires_at
    }
}
