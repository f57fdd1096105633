//! Configuration management for the relay service.
//!
//! Loads configuration from environment variables (and a `.env` file, when
//! present). Provider credentials and the recipient list are required;
//! everything else has a default.

use contact_relay_core::{MailConfig, RelayConfig, VerificationConfig};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8787;

/// Configuration errors, reported once at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be used.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Service configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider credentials and message settings
    pub relay: RelayConfig,
    /// Listener configuration
    pub server: ServerConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Prometheus scrape address; the exporter is off when unset
    pub metrics_addr: Option<SocketAddr>,
}

impl ServerConfig {
    /// `host:port` for the HTTP listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first; variables already
    /// set in the environment win.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or any value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or any value
    /// fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let timeout = match get("OUTBOUND_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => contact_relay_core::config::DEFAULT_TIMEOUT,
        };

        let mut verification =
            VerificationConfig::new(require("RECAPTCHA_SECRET_KEY")?).with_timeout(timeout);
        if let Some(endpoint) = get("RECAPTCHA_VERIFY_URL") {
            verification = verification.with_endpoint(endpoint);
        }

        let recipients = parse_recipients(&require("RECIPIENT_EMAILS")?)?;
        let mut mail = MailConfig::new(
            require("MAILGUN_API_KEY")?,
            require("MAILGUN_DOMAIN")?,
            recipients,
        )
        .with_timeout(timeout);
        if let Some(api_base) = get("MAILGUN_API_BASE") {
            mail = mail.with_api_base(api_base);
        }
        if let Some(site_name) = get("CONTACT_SITE_NAME") {
            mail = mail.with_site_name(site_name);
        }

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: format!("{e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let metrics_addr = get("METRICS_ADDR")
            .map(|raw| {
                raw.trim().parse().map_err(|e| ConfigError::Invalid {
                    key: "METRICS_ADDR",
                    reason: format!("{e}"),
                })
            })
            .transpose()?;

        Ok(Self {
            relay: RelayConfig::new(verification, mail),
            server: ServerConfig {
                host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
                metrics_addr,
            },
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "OUTBOUND_TIMEOUT_SECS",
        reason,
    };
    let secs: u64 = raw.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    if secs == 0 {
        return Err(invalid("must be at least 1 second".to_string()));
    }
    Ok(Duration::from_secs(secs))
}

/// Split a comma-separated recipient list, dropping blank entries.
fn parse_recipients(raw: &str) -> Result<Vec<String>, ConfigError> {
    let recipients: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(ToString::to_string)
        .collect();

    if recipients.is_empty() {
        return Err(ConfigError::Invalid {
            key: "RECIPIENT_EMAILS",
            reason: "no recipients listed".to_string(),
        });
    }
    Ok(recipients)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn required() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("RECAPTCHA_SECRET_KEY", "secret"),
            ("MAILGUN_API_KEY", "key-123"),
            ("MAILGUN_DOMAIN", "mg.example.com"),
            ("RECIPIENT_EMAILS", "ventas@example.com, info@example.com"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<Config, ConfigError> {
        Config::from_lookup(|key| vars.get(key).map(ToString::to_string))
    }

    #[test]
    fn test_defaults() {
        let config = load(&required()).unwrap();

        assert_eq!(config.server.bind_address(), "0.0.0.0:8787");
        assert_eq!(config.server.metrics_addr, None);
        assert_eq!(
            config.relay.mail.recipients,
            vec!["ventas@example.com", "info@example.com"]
        );
        assert_eq!(
            config.relay.mail.messages_url(),
            "https://api.mailgun.net/v3/mg.example.com/messages"
        );
        assert_eq!(config.relay.mail.site_name, "Imprenta CASBAR");
        assert_eq!(
            config.relay.verification.endpoint,
            "https://www.google.com/recaptcha/api/siteverify"
        );
        assert_eq!(config.relay.verification.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let mut vars = required();
        vars.insert("RECAPTCHA_VERIFY_URL", "http://127.0.0.1:9000/verify");
        vars.insert("MAILGUN_API_BASE", "https://api.eu.mailgun.net/");
        vars.insert("CONTACT_SITE_NAME", "Acme");
        vars.insert("OUTBOUND_TIMEOUT_SECS", "3");
        vars.insert("HOST", "127.0.0.1");
        vars.insert("PORT", "9090");
        vars.insert("METRICS_ADDR", "127.0.0.1:9100");

        let config = load(&vars).unwrap();

        assert_eq!(config.server.bind_address(), "127.0.0.1:9090");
        assert_eq!(
            config.server.metrics_addr,
            Some("127.0.0.1:9100".parse().unwrap())
        );
        assert_eq!(config.relay.verification.endpoint, "http://127.0.0.1:9000/verify");
        assert_eq!(config.relay.verification.timeout, Duration::from_secs(3));
        assert_eq!(config.relay.mail.timeout, Duration::from_secs(3));
        assert_eq!(
            config.relay.mail.messages_url(),
            "https://api.eu.mailgun.net/v3/mg.example.com/messages"
        );
        assert_eq!(config.relay.mail.site_name, "Acme");
    }

    #[test]
    fn test_missing_required() {
        for key in [
            "RECAPTCHA_SECRET_KEY",
            "MAILGUN_API_KEY",
            "MAILGUN_DOMAIN",
            "RECIPIENT_EMAILS",
        ] {
            let mut vars = required();
            vars.remove(key);
            assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing(key));

            vars.insert(key, "   ");
            assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing(key));
        }
    }

    #[test]
    fn test_empty_recipient_list() {
        let mut vars = required();
        vars.insert("RECIPIENT_EMAILS", " , ,");

        let err = load(&vars).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { key: "RECIPIENT_EMAILS", .. }));
    }

    #[test]
    fn test_invalid_numbers() {
        for (key, value) in [
            ("PORT", "http"),
            ("PORT", "70000"),
            ("OUTBOUND_TIMEOUT_SECS", "0"),
            ("OUTBOUND_TIMEOUT_SECS", "soon"),
            ("METRICS_ADDR", "localhost"),
        ] {
            let mut vars = required();
            vars.insert(key, value);

            let err = load(&vars).unwrap_err();

            assert!(
                matches!(err, ConfigError::Invalid { key: k, .. } if k == key),
                "{key}={value}: {err}"
            );
        }
    }
}
