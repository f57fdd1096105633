//! # Contact Relay Testing
//!
//! Test helpers shared by the relay's crates:
//! - Recording mock providers ([`MockVerifier`], [`MockMailer`])
//! - Request-body and configuration fixtures
//! - One-call tracing setup for noisy tests
//!
//! ## Example
//!
//! ```ignore
//! use contact_relay_core::Relay;
//! use contact_relay_testing::{fixtures, MockMailer, MockVerifier};
//!
//! #[tokio::test]
//! async fn test_rejected_token_never_sends() {
//!     let mailer = MockMailer::accepting();
//!     let relay = Relay::new(&fixtures::relay_config(), MockVerifier::rejecting("bad"), mailer.clone());
//!
//!     let err = relay.handle(&fixtures::valid_body()).await.unwrap_err();
//!
//!     assert_eq!(err.status(), 400);
//!     assert_eq!(mailer.calls(), 0);
//! }
//! ```

pub mod mocks;

pub use mocks::{MockMailer, MockVerifier};

/// Request bodies and configuration used across test suites.
pub mod fixtures {
    use contact_relay_core::{MailConfig, RelayConfig, VerificationConfig};
    use serde_json::{Value, json};

    /// Name in [`valid_form`].
    pub const NAME: &str = "Lucía Fernández";
    /// Email in [`valid_form`].
    pub const EMAIL: &str = "lucia@example.com";
    /// Phone in [`valid_form`].
    pub const PHONE: &str = "+52 55 1234 5678";
    /// Message in [`valid_form`].
    pub const MESSAGE: &str = "Necesito 500 tarjetas de presentación.\n¿Cuál es el precio?";
    /// Verification token in [`valid_form`].
    pub const TOKEN: &str = "03AFcWeA-test-token";

    /// A complete form as the browser script posts it.
    #[must_use]
    pub fn valid_form() -> Value {
        json!({
            "name": NAME,
            "email": EMAIL,
            "phone": PHONE,
            "message": MESSAGE,
            "recaptchaResponse": TOKEN,
        })
    }

    /// [`valid_form`] serialized.
    #[must_use]
    pub fn valid_body() -> Vec<u8> {
        valid_form().to_string().into_bytes()
    }

    /// [`valid_form`] with one field replaced.
    #[must_use]
    pub fn form_with(field: &str, value: Value) -> Value {
        let mut form = valid_form();
        form[field] = value;
        form
    }

    /// [`valid_form`] with one field removed.
    #[must_use]
    pub fn form_without(field: &str) -> Value {
        let mut form = valid_form();
        if let Some(map) = form.as_object_mut() {
            map.remove(field);
        }
        form
    }

    /// Configuration with two recipients on a test domain.
    #[must_use]
    pub fn relay_config() -> RelayConfig {
        RelayConfig::new(
            VerificationConfig::new("test-recaptcha-secret"),
            MailConfig::new(
                "test-mailgun-key",
                "mg.example.com",
                vec!["ventas@example.com".into(), "info@example.com".into()],
            ),
        )
    }
}

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Honors `RUST_LOG`. Safe to call from every test; only the first call wins.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contact_relay=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::fixtures;

    #[test]
    fn test_form_without_removes_field() {
        let form = fixtures::form_without("phone");
        assert!(form.get("phone").is_none());
        assert_eq!(form["name"], fixtures::NAME);
    }

    #[test]
    fn test_form_with_replaces_field() {
        let form = fixtures::form_with("name", serde_json::json!(""));
        assert_eq!(form["name"], "");
    }
}
