use async_trait::async_trait;

use super::AccessEvent;

/// Trait for handling access-control events asynchronously.
///
/// Implement this trait to create custom event listeners. Listeners can
/// perform any async operation: sending invitation emails, writing
/// audit records, updating metrics, etc.
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Handle an event.
    ///
    /// This method is called for every event dispatched. Filter by
    /// matching on the event variant to handle specific events.
    async fn handle(&self, event: &AccessEvent);
}
