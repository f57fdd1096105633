//! Mailgun messages API client.

use crate::error::ProviderError;
use contact_relay_core::{EmailDispatchRequest, MailConfig, MailDispatcher, ProviderOutcome};
use reqwest::Client;

/// Basic-auth user name Mailgun expects alongside the API key.
const API_USER: &str = "api";

/// Longest provider error body kept in an outcome.
const MAX_ERROR_BODY: usize = 512;

/// Sends messages through `POST /v3/{domain}/messages`.
///
/// # Example
///
/// ```no_run
/// use contact_relay_core::MailConfig;
/// use contact_relay_providers::MailgunMailer;
///
/// let config = MailConfig::new("key-...", "mg.example.com", vec!["owner@example.com".into()])
///     .with_api_base("https://api.eu.mailgun.net");
/// let mailer = MailgunMailer::new(&config)?;
/// # Ok::<(), contact_relay_providers::ProviderError>(())
/// ```
#[derive(Clone)]
pub struct MailgunMailer {
    http_client: Client,
    api_key: String,
    messages_url: String,
}

impl MailgunMailer {
    /// Create a mailer from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &MailConfig) -> Result<Self, ProviderError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            messages_url: config.messages_url(),
        })
    }

    /// Endpoint this mailer posts to.
    #[must_use]
    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }
}

impl std::fmt::Debug for MailgunMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailgunMailer")
            .field("messages_url", &self.messages_url)
            .finish_non_exhaustive()
    }
}

/// Form fields for the messages endpoint.
fn form_fields(email: &EmailDispatchRequest) -> [(&'static str, String); 6] {
    [
        ("from", email.from.clone()),
        ("to", email.to.join(",")),
        ("subject", email.subject.clone()),
        ("text", email.text.clone()),
        ("html", email.html.clone()),
        ("h:Reply-To", email.reply_to.clone()),
    ]
}

impl MailDispatcher for MailgunMailer {
    async fn dispatch(&self, email: &EmailDispatchRequest) -> ProviderOutcome {
        let response = match self
            .http_client
            .post(&self.messages_url)
            .basic_auth(API_USER, Some(&self.api_key))
            .form(&form_fields(email))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(timeout = e.is_timeout(), "Email sending error: {e}");
                return ProviderOutcome::unreachable(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            tracing::error!(%status, "Mailgun error: {body}");
            return ProviderOutcome::rejected(format!("status {status}: {body}"));
        }

        ProviderOutcome::Accepted
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email() -> EmailDispatchRequest {
        EmailDispatchRequest {
            from: "Imprenta CASBAR <mailgun@mg.example.com>".into(),
            to: vec!["a@example.com".into(), "b@example.com".into()],
            subject: "Nuevo mensaje de contacto de Ana".into(),
            text: "text".into(),
            html: "<p>html</p>".into(),
            reply_to: "ana@example.com".into(),
        }
    }

    #[test]
    fn test_form_fields() {
        let fields = form_fields(&email());
        let names: Vec<_> = fields.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, ["from", "to", "subject", "text", "html", "h:Reply-To"]);
        assert_eq!(fields[1].1, "a@example.com,b@example.com");
        assert_eq!(fields[5].1, "ana@example.com");
    }

    #[test]
    fn test_messages_url_from_config() {
        let config = MailConfig::new("k", "mg.example.com", vec![]);
        let mailer = MailgunMailer::new(&config).unwrap();
        assert_eq!(
            mailer.messages_url(),
            "https://api.mailgun.net/v3/mg.example.com/messages"
        );
    }
}
