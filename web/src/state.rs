//! Application state for the relay handler.

use contact_relay_core::Relay;
use std::sync::Arc;

/// State shared across requests: the relay and nothing else.
///
/// The relay holds only immutable configuration and provider clients, so
/// concurrent requests share it without locking.
pub struct AppState<V, M> {
    /// The orchestrator.
    pub relay: Arc<Relay<V, M>>,
}

impl<V, M> AppState<V, M> {
    /// Wrap a relay for sharing across handlers.
    #[must_use]
    pub fn new(relay: Relay<V, M>) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

// Manual impl: cloning shares the Arc and must not require `V: Clone`.
impl<V, M> Clone for AppState<V, M> {
    fn clone(&self) -> Self {
        Self {
            relay: Arc::clone(&self.relay),
        }
    }
}
