#![allow(clippy::significant_drop_tightening)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use super::repository::{SessionRepository, UserRepository};
use super::types::{CreateUser, Session, SessionData, User};
use crate::AccessError;
use crate::crypto::generate_token;

type SessionMap = Arc<RwLock<HashMap<String, SessionData>>>;

/// In-memory session storage.
///
/// Stores sessions in a `HashMap` protected by a `RwLock`, keyed by
/// session ID. Sessions are lost when the process restarts.
#[derive(Clone)]
pub struct MockSessionRepository {
    sessions: SessionMap,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of sessions currently stored.
    pub fn len(&self) -> usize {
        self.sessions.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn shared_map(&self) -> SessionMap {
        Arc::clone(&self.sessions)
    }
}

impl Default for MockSessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(&self, data: SessionData) -> Result<Session, AccessError> {
        let session_id = generate_token(32);

        self.sessions
            .write()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?
            .insert(session_id.clone(), data.clone());

        Ok(Session::new(session_id, data))
    }

    async fn find(&self, session_id: &str) -> Result<Option<Session>, AccessError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;

        Ok(sessions
            .get(session_id)
            .map(|data| Session::new(session_id.to_owned(), data.clone())))
    }

    async fn destroy(&self, session_id: &str) -> Result<(), AccessError> {
        self.sessions
            .write()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?
            .remove(session_id);

        Ok(())
    }

    async fn destroy_user_sessions(&self, user_id: i64) -> Result<u64, AccessError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;

        let before = sessions.len();
        sessions.retain(|_, data| data.user_id != user_id);
        let destroyed = before.saturating_sub(sessions.len());

        Ok(u64::try_from(destroyed).unwrap_or(u64::MAX))
    }

    async fn count_user_sessions(&self, user_id: i64) -> Result<u64, AccessError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;

        let count = sessions.values().filter(|d| d.user_id == user_id).count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }
}

/// In-memory user storage.
///
/// Construct with [`MockUserRepository::linked`] to share session state
/// with a [`MockSessionRepository`]; `archive` then purges the user's
/// sessions the way a transactional backend would.
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    sessions: SessionMap,
    next_id: Arc<AtomicI64>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Creates a user repository sharing session state with `sessions`.
    pub fn linked(sessions: &MockSessionRepository) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            sessions: sessions.shared_map(),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, data: CreateUser) -> Result<User, AccessError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;

        if users.values().any(|u| u.email == data.email) {
            return Err(AccessError::Conflict(format!(
                "a user with email {} already exists",
                data.email
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let user = User {
            id,
            email: data.email,
            name: data.name,
            archived_at: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AccessError> {
        let users = self
            .users
            .read()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccessError> {
        let users = self
            .users
            .read()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn archive(&self, id: i64) -> Result<User, AccessError> {
        // Holding the user lock across the session purge makes the
        // compound write all-or-nothing, mirroring a transaction.
        let mut users = self
            .users
            .write()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;

        let user = users.get_mut(&id).ok_or(AccessError::NotFound)?;
        let now = Utc::now();
        if user.archived_at.is_none() {
            user.archived_at = Some(now);
            user.updated_at = now;
        }
        let archived = user.clone();

        self.sessions
            .write()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?
            .retain(|_, data| data.user_id != id);

        Ok(archived)
    }

    async fn restore(&self, id: i64) -> Result<User, AccessError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AccessError::Store("lock poisoned".to_owned()))?;

        let user = users.get_mut(&id).ok_or(AccessError::NotFound)?;
        if user.archived_at.is_some() {
            user.archived_at = None;
            user.updated_at = Utc::now();
        }

        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn session_data(user_id: i64) -> SessionData {
        SessionData {
            user_id,
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::hours(2),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_session() {
        let repo = MockSessionRepository::new();

        let session = repo.create(session_data(1)).await.unwrap();
        assert_eq!(session.id.len(), 32);

        let found = repo.find(&session.id).await.unwrap().unwrap();
        assert_eq!(found.data.user_id, 1);

        assert!(repo.find("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_destroy_user_sessions() {
        let repo = MockSessionRepository::new();

        repo.create(session_data(1)).await.unwrap();
        repo.create(session_data(1)).await.unwrap();
        repo.create(session_data(2)).await.unwrap();

        let destroyed = repo.destroy_user_sessions(1).await.unwrap();
        assert_eq!(destroyed, 2);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.count_user_sessions(1).await.unwrap(), 0);
        assert_eq!(repo.count_user_sessions(2).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let repo = MockUserRepository::new();

        repo.create(CreateUser {
            email: "a@example.com".to_owned(),
            name: "A".to_owned(),
        })
        .await
        .unwrap();

        let result = repo
            .create(CreateUser {
                email: "a@example.com".to_owned(),
                name: "A2".to_owned(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), AccessError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_archive_purges_linked_sessions() {
        let session_repo = MockSessionRepository::new();
        let user_repo = MockUserRepository::linked(&session_repo);

        let user = user_repo
            .create(CreateUser {
                email: "a@example.com".to_owned(),
                name: "A".to_owned(),
            })
            .await
            .unwrap();

        session_repo.create(session_data(user.id)).await.unwrap();
        session_repo.create(session_data(user.id)).await.unwrap();

        let archived = user_repo.archive(user.id).await.unwrap();
        assert!(archived.is_archived());
        assert_eq!(session_repo.count_user_sessions(user.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_archive_is_idempotent() {
        let user_repo = MockUserRepository::new();

        let user = user_repo
            .create(CreateUser {
                email: "a@example.com".to_owned(),
                name: "A".to_owned(),
            })
            .await
            .unwrap();

        let first = user_repo.archive(user.id).await.unwrap();
        let second = user_repo.archive(user.id).await.unwrap();
        assert_eq!(first.archived_at, second.archived_at);
    }

    #[tokio::test]
    async fn test_restore_is_noop_when_active() {
        let user_repo = MockUserRepository::new();

        let user = user_repo
            .create(CreateUser {
                email: "a@example.com".to_owned(),
                name: "A".to_owned(),
            })
            .await
            .unwrap();

        let restored = user_repo.restore(user.id).await.unwrap();
        assert!(!restored.is_archived());
        assert_eq!(restored.updated_at, user.updated_at);
    }
}
