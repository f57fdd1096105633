//! Relay configuration.
//!
//! Built once at process start and handed to the orchestrator and both provider
//! clients by value. Nothing below `main` reads the environment.

use std::fmt;
use std::time::Duration;

/// Default reCAPTCHA verification endpoint.
pub const DEFAULT_VERIFY_ENDPOINT: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Default Mailgun API base (US region).
pub const DEFAULT_MAIL_API_BASE: &str = "https://api.mailgun.net";

/// Default display name used in `From` and the message footer.
pub const DEFAULT_SITE_NAME: &str = "Imprenta CASBAR";

/// Default bound on each outbound call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Verification provider configuration.
#[derive(Clone)]
pub struct VerificationConfig {
    /// Server-side secret issued by the verification provider.
    pub secret: String,

    /// Full URL of the verification endpoint.
    ///
    /// Default: [`DEFAULT_VERIFY_ENDPOINT`]
    pub endpoint: String,

    /// Upper bound for the whole verification round trip.
    ///
    /// Default: 10 seconds
    pub timeout: Duration,
}

impl VerificationConfig {
    /// Create a verification config with default endpoint and timeout.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            endpoint: DEFAULT_VERIFY_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point at a different endpoint (regional mirrors, test servers).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the outbound timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for VerificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationConfig")
            .field("secret", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Mail provider configuration.
#[derive(Clone)]
pub struct MailConfig {
    /// Private API key for the mail provider.
    pub api_key: String,

    /// Sending domain registered with the provider (e.g. `mg.example.com`).
    pub domain: String,

    /// Addresses that receive every submission.
    pub recipients: Vec<String>,

    /// API base URL without trailing slash.
    ///
    /// Default: [`DEFAULT_MAIL_API_BASE`]
    pub api_base: String,

    /// Name shown in `From` and in the footer of the message.
    ///
    /// Default: [`DEFAULT_SITE_NAME`]
    pub site_name: String,

    /// Upper bound for the whole dispatch round trip.
    ///
    /// Default: 10 seconds
    pub timeout: Duration,
}

impl MailConfig {
    /// Create a mail config with default base URL, site name and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>, domain: impl Into<String>, recipients: Vec<String>) -> Self {
        Self {
            api_key: api_key.into(),
            domain: domain.into(),
            recipients,
            api_base: DEFAULT_MAIL_API_BASE.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the API base URL. A trailing slash is dropped.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Set the site name.
    #[must_use]
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    /// Set the outbound timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the messages endpoint.
    #[must_use]
    pub fn messages_url(&self) -> String {
        format!("{}/v3/{}/messages", self.api_base, self.domain)
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_key", &"<redacted>")
            .field("domain", &self.domain)
            .field("recipients", &self.recipients)
            .field("api_base", &self.api_base)
            .field("site_name", &self.site_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Everything the relay needs, fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Verification provider settings.
    pub verification: VerificationConfig,

    /// Mail provider settings.
    pub mail: MailConfig,
}

impl RelayConfig {
    /// Combine provider configurations.
    #[must_use]
    pub const fn new(verification: VerificationConfig, mail: MailConfig) -> Self {
        Self { verification, mail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let config = RelayConfig::new(
            VerificationConfig::new("6Lc-secret"),
            MailConfig::new("key-abc123", "mg.example.com", vec!["a@example.com".into()]),
        );
        let debug = format!("{config:?}");
        assert!(!debug.contains("6Lc-secret"));
        assert!(!debug.contains("key-abc123"));
        assert!(debug.contains("mg.example.com"));
    }

    #[test]
    fn test_messages_url() {
        let mail = MailConfig::new("k", "mg.example.com", vec![])
            .with_api_base("https://api.eu.mailgun.net/");
        assert_eq!(
            mail.messages_url(),
            "https://api.eu.mailgun.net/v3/mg.example.com/messages"
        );
    }

    #[test]
    fn test_defaults() {
        let verification = VerificationConfig::new("s");
        assert_eq!(verification.endpoint, DEFAULT_VERIFY_ENDPOINT);
        assert_eq!(verification.timeout, DEFAULT_TIMEOUT);

        let mail = MailConfig::new("k", "d", vec![]);
        assert_eq!(mail.site_name, DEFAULT_SITE_NAME);
        assert_eq!(mail.api_base, DEFAULT_MAIL_API_BASE);
    }
}
