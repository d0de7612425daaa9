//! User accounts, sessions, and lifecycle actions.

pub mod actions;
mod repository;
mod types;

pub use actions::{ArchiveUserAction, RestoreUserAction, SuspendUserAction};
pub use repository::{SessionRepository, UserRepository};
pub use types::{CreateUser, Session, SessionData, User};

#[cfg(any(test, feature = "mocks"))]
mod mocks;

#[cfg(any(test, feature = "mocks"))]
pub use mocks::{MockSessionRepository, MockUserRepository};
