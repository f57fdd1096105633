//! Axum HTTP boundary for the contact-form relay.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         HTTP boundary (Axum)            │  ← method dispatch, CORS
//! │  - Preflight / 405 handling             │  ← JSON error bodies
//! │  - Response serialization               │  ← request tracing
//! ├─────────────────────────────────────────┤
//! │         Relay (contact-relay-core)      │
//! │  - Validation                           │  ← no HTTP types beyond status
//! │  - Verify, then dispatch                │  ← providers behind traits
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use contact_relay_web::build_router;
//!
//! let app = build_router(Relay::new(&config, verifier, mailer));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8787").await?;
//! axum::serve(listener, app).await?;
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::ClientIp;
pub use middleware::{CorsHeadersLayer, cors_layer, panic_layer};
pub use router::build_router;
pub use state::AppState;
