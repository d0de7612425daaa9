//! Built-in event listeners.
//!
//! Use them with [`register_event_listeners`](crate::register_event_listeners).

mod logging;

pub use logging::LoggingListener;
