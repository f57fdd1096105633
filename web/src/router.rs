//! Router configuration.

use crate::handlers::relay_submission;
use crate::middleware::{cors_layer, panic_layer};
use crate::state::AppState;
use axum::Router;
use contact_relay_core::{HumanVerifier, MailDispatcher, Relay};
use tower_http::trace::TraceLayer;

/// Build the relay's router.
///
/// Every path and method reaches [`relay_submission`], which does its own
/// method dispatch. A panic below the CORS layer becomes the generic 500,
/// and every response passes through the CORS layer on the way out.
///
/// # Arguments
///
/// - `relay`: Orchestrator wired to real or mock providers
pub fn build_router<V, M>(relay: Relay<V, M>) -> Router
where
    V: HumanVerifier + 'static,
    M: MailDispatcher + 'static,
{
    Router::new()
        .fallback(relay_submission::<V, M>)
        .layer(TraceLayer::new_for_http())
        .layer(panic_layer())
        .layer(cors_layer())
        .with_state(AppState::new(relay))
}
