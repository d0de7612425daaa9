//! Event system for access-control actions.
//!
//! Events are fired from all lifecycle actions. If no listeners are
//! registered, they are silently ignored (zero overhead). Notification
//! delivery and audit logging attach here rather than inside the core:
//! an `invite.created` listener sends the invitation email, a
//! `user.suspended` listener records the administrative intent the
//! persisted model deliberately omits.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use warden::register_event_listeners;
//! use warden::events::listeners::LoggingListener;
//!
//! fn main() {
//!     // register listeners at startup
//!     register_event_listeners(|registry| {
//!         registry.listen(LoggingListener::new());
//!     });
//! }
//! ```
//!
//! # Custom Listeners
//!
//! Implement the [`Listener`] trait to create custom event handlers:
//!
//! ```rust,ignore
//! use warden::events::{AccessEvent, Listener};
//! use async_trait::async_trait;
//!
//! struct InviteMailer;
//!
//! #[async_trait]
//! impl Listener for InviteMailer {
//!     async fn handle(&self, event: &AccessEvent) {
//!         if let AccessEvent::InviteCreated { email, .. } = event {
//!             // send the invitation email
//!         }
//!     }
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::AccessEvent;
pub use listener::Listener;
pub use registry::{dispatch, register_event_listeners};
