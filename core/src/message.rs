//! Notification email composition.
//!
//! The plain-text part reproduces the submission verbatim. The HTML part
//! escapes every interpolated value, and header-bound values have control
//! characters removed so a visitor cannot inject extra headers.

use crate::config::MailConfig;
use crate::submission::Submission;

/// A fully composed message, ready for the mail provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDispatchRequest {
    /// `From` header, e.g. `Imprenta CASBAR <mailgun@mg.example.com>`.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
    /// HTML body.
    pub html: String,
    /// `Reply-To` header, the visitor's address.
    pub reply_to: String,
}

/// Builds [`EmailDispatchRequest`]s from submissions.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    from: String,
    recipients: Vec<String>,
    site_name: String,
}

impl MessageComposer {
    /// Create a composer for the configured sending domain and recipients.
    #[must_use]
    pub fn new(config: &MailConfig) -> Self {
        Self {
            from: format!(
                "{} <mailgun@{}>",
                strip_control(&config.site_name),
                strip_control(&config.domain)
            ),
            recipients: config.recipients.clone(),
            site_name: config.site_name.clone(),
        }
    }

    /// Compose the notification for one submission.
    #[must_use]
    pub fn compose(&self, submission: &Submission) -> EmailDispatchRequest {
        EmailDispatchRequest {
            from: self.from.clone(),
            to: self.recipients.clone(),
            subject: format!(
                "Nuevo mensaje de contacto de {}",
                strip_control(&submission.name)
            ),
            text: self.text_body(submission),
            html: self.html_body(submission),
            reply_to: strip_control(&submission.email),
        }
    }

    fn text_body(&self, submission: &Submission) -> String {
        format!(
            "Has recibido un nuevo mensaje desde el formulario de contacto:\n\
             \n\
             Nombre: {name}\n\
             Email: {email}\n\
             Teléfono: {phone}\n\
             \n\
             Mensaje:\n\
             {message}\n\
             \n\
             ---\n\
             Este mensaje fue enviado desde el formulario de contacto de {site}.",
            name = submission.name,
            email = submission.email,
            phone = submission.phone_or_fallback(),
            message = submission.message,
            site = self.site_name,
        )
    }

    fn html_body(&self, submission: &Submission) -> String {
        let message = escape_html(&submission.message).replace('\n', "<br>\n");

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Nuevo mensaje de contacto</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #2563eb;">Nuevo mensaje de contacto</h2>
        <p><strong>Nombre:</strong> {name}</p>
        <p><strong>Email:</strong> {email}</p>
        <p><strong>Teléfono:</strong> {phone}</p>
        <div style="background-color: #f3f4f6; border-left: 4px solid #2563eb; padding: 15px; margin: 20px 0;">
            <p style="margin: 0;">{message}</p>
        </div>
        <p style="color: #666; font-size: 12px; margin-top: 40px;">
            Este mensaje fue enviado desde el formulario de contacto de {site}.
        </p>
    </div>
</body>
</html>
"#,
            name = escape_html(&submission.name),
            email = escape_html(&submission.email),
            phone = escape_html(submission.phone_or_fallback()),
            site = escape_html(&self.site_name),
        )
    }
}

/// Escape the five HTML-significant characters.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Remove control characters (CR, LF, NUL, ...) from a header value.
#[must_use]
pub fn strip_control(input: &str) -> String {
    input.chars().filter(|c| !c.is_control()).collect()
}
