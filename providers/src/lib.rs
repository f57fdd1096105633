//! HTTP clients for the contact-form relay's remote providers.
//!
//! - [`RecaptchaVerifier`]: confirms human-verification tokens (`siteverify` protocol)
//! - [`MailgunMailer`]: delivers the notification email (Mailgun messages API)
//!
//! Both apply the configured timeout to the whole round trip and fold every
//! failure into a [`ProviderOutcome`](contact_relay_core::ProviderOutcome).

pub mod error;
pub mod mailgun;
pub mod recaptcha;

pub use error::ProviderError;
pub use mailgun::MailgunMailer;
pub use recaptcha::RecaptchaVerifier;
