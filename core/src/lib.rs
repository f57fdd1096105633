//! # Contact Relay Core
//!
//! Validation, composition and orchestration for a static site's contact form.
//!
//! A visitor's browser posts the form as JSON together with a human-verification
//! token. The relay re-checks the token with the verification provider and, only
//! if it passes, sends a notification email through the mail provider.
//!
//! ## Layout
//!
//! - [`submission`]: inbound payload and required-field validation
//! - [`message`]: notification email composition
//! - [`providers`]: traits for the verification and mail providers
//! - [`relay`]: the orchestrator that gates dispatch behind verification
//! - [`error`]: failure taxonomy and status-code selection
//! - [`response`]: JSON bodies and localized texts
//! - [`config`]: immutable process-wide configuration
//!
//! ## Example
//!
//! ```ignore
//! use contact_relay_core::{Relay, RelayConfig};
//!
//! let relay = Relay::new(&config, verifier, mailer);
//!
//! match relay.handle(body).await {
//!     Ok(_delivery) => (StatusCode::OK, Json(RelayResponse::sent())),
//!     Err(e) => (e.status(), Json(RelayResponse::failed(e.public_message()))),
//! }
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod providers;
pub mod relay;
pub mod response;
pub mod submission;

pub use config::{MailConfig, RelayConfig, VerificationConfig};
pub use error::{RelayError, Result};
pub use message::{EmailDispatchRequest, MessageComposer};
pub use providers::{HumanVerifier, MailDispatcher, ProviderOutcome};
pub use relay::{Delivery, Relay, unreadable_body};
pub use response::RelayResponse;
pub use submission::{ContactForm, Submission};
