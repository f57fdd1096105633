//! Google reCAPTCHA verification client.

use crate::error::ProviderError;
use contact_relay_core::{HumanVerifier, ProviderOutcome, VerificationConfig};
use reqwest::Client;
use serde::Deserialize;

/// Verifies reCAPTCHA tokens against the `siteverify` endpoint.
///
/// Also works unchanged with any provider that speaks the same protocol
/// (Cloudflare Turnstile, hCaptcha) by pointing `endpoint` at it.
///
/// # Example
///
/// ```no_run
/// use contact_relay_core::VerificationConfig;
/// use contact_relay_providers::RecaptchaVerifier;
///
/// let verifier = RecaptchaVerifier::new(&VerificationConfig::new("your-secret"))?;
/// # Ok::<(), contact_relay_providers::ProviderError>(())
/// ```
#[derive(Clone)]
pub struct RecaptchaVerifier {
    /// HTTP client with the configured timeout.
    http_client: Client,

    /// Server-side secret (keep confidential).
    secret: String,

    /// Verification endpoint URL.
    endpoint: String,
}

impl RecaptchaVerifier {
    /// Create a verifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &VerificationConfig) -> Result<Self, ProviderError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            secret: config.secret.clone(),
            endpoint: config.endpoint.clone(),
        })
    }
}

impl std::fmt::Debug for RecaptchaVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecaptchaVerifier")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl HumanVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> ProviderOutcome {
        let params = [("secret", self.secret.as_str()), ("response", token)];

        let response = match self
            .http_client
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(timeout = e.is_timeout(), "reCAPTCHA verification error: {e}");
                return ProviderOutcome::unreachable(e.to_string());
            }
        };

        let status = response.status();
        let reply: SiteVerifyResponse = match response.json().await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(%status, "reCAPTCHA reply was not JSON: {e}");
                return ProviderOutcome::rejected(format!("unreadable reply (status {status})"));
            }
        };

        if reply.success == Some(true) {
            ProviderOutcome::Accepted
        } else if reply.error_codes.is_empty() {
            ProviderOutcome::rejected("success flag not set")
        } else {
            ProviderOutcome::rejected(reply.error_codes.join(", "))
        }
    }
}

/// `siteverify` reply. Only the fields the relay reads.
#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    /// Whether the token was valid for this site.
    success: Option<bool>,

    /// Reasons for failure, e.g. `timeout-or-duplicate`.
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}
