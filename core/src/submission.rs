//! Inbound contact-form payload and its validation.

use crate::error::{RelayError, Result};
use serde::Deserialize;

/// Label rendered in place of a phone number the visitor left blank.
pub const PHONE_FALLBACK: &str = "No proporcionado";

/// Raw JSON body as posted by the browser.
///
/// Every field is optional at this stage so that a missing field is reported
/// as [`RelayError::MissingFields`] rather than as a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    /// Visitor's name.
    pub name: Option<String>,
    /// Visitor's email address.
    pub email: Option<String>,
    /// Visitor's phone number.
    pub phone: Option<String>,
    /// Free-form message.
    pub message: Option<String>,
    /// Token from the client-side verification widget.
    #[serde(alias = "verificationToken")]
    pub recaptcha_response: Option<String>,
}

impl ContactForm {
    /// Decode a request body.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MalformedRequest`] if the body is not a JSON object
    /// or a field has the wrong type.
    pub fn parse(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| RelayError::MalformedRequest(e.to_string()))
    }

    /// Check required fields and produce a [`Submission`].
    ///
    /// Values are kept exactly as submitted; trimming only decides emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MissingFields`] if `name`, `email`, `message` or the
    /// verification token is absent or blank.
    pub fn validate(self) -> Result<Submission> {
        let (Some(name), Some(email), Some(message), Some(verification_token)) = (
            non_blank(self.name),
            non_blank(self.email),
            non_blank(self.message),
            non_blank(self.recaptcha_response),
        ) else {
            return Err(RelayError::MissingFields);
        };

        Ok(Submission {
            name,
            email,
            phone: non_blank(self.phone),
            message,
            verification_token,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A validated submission. Lives for one request.
#[derive(Clone, PartialEq, Eq)]
pub struct Submission {
    /// Visitor's name.
    pub name: String,
    /// Visitor's email address, used as `Reply-To`.
    pub email: String,
    /// Phone number, `None` when left blank.
    pub phone: Option<String>,
    /// Free-form message.
    pub message: String,
    /// Token to confirm with the verification provider.
    pub verification_token: String,
}

impl Submission {
    /// Phone number, or [`PHONE_FALLBACK`] when none was given.
    #[must_use]
    pub fn phone_or_fallback(&self) -> &str {
        self.phone.as_deref().unwrap_or(PHONE_FALLBACK)
    }

    /// Domain part of the visitor's email, for logs.
    #[must_use]
    pub fn email_domain(&self) -> &str {
        self.email
            .rsplit_once('@')
            .map_or("unknown", |(_, domain)| domain)
    }
}

// Visitor content and the token stay out of logs.
impl std::fmt::Debug for Submission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Submission")
            .field("email_domain", &self.email_domain())
            .field("has_phone", &self.phone.is_some())
            .field("message_len", &self.message.len())
            .finish_non_exhaustive()
    }
}
