use async_trait::async_trait;

use crate::events::{AccessEvent, Listener};

/// Logs all access-control events using the `log` crate.
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Creates a new logging listener at INFO level.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    /// Creates a new logging listener at the specified level.
    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &AccessEvent) {
        log::log!(
            target: "warden::events",
            self.level,
            "event={} {:?}",
            event.name(),
            event
        );
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_logging_listener_levels() {
        assert_eq!(LoggingListener::new().level, log::Level::Info);
        assert_eq!(LoggingListener::default().level, log::Level::Info);
        assert_eq!(
            LoggingListener::with_level(log::Level::Debug).level,
            log::Level::Debug
        );
    }

    #[tokio::test]
    async fn test_logging_listener_handle() {
        let listener = LoggingListener::new();
        let event = AccessEvent::UserRestored {
            user_id: 1,
            by: 2,
            at: Utc::now(),
        };

        // should not panic
        listener.handle(&event).await;
    }
}
