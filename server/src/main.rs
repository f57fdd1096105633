//! Contact-form relay HTTP server.
//!
//! Accepts website contact submissions, checks the reCAPTCHA token and
//! forwards the message to the configured recipients through Mailgun.
//!
//! # Running
//!
//! ```bash
//! RECAPTCHA_SECRET_KEY=... MAILGUN_API_KEY=... MAILGUN_DOMAIN=mg.example.com \
//! RECIPIENT_EMAILS=ventas@example.com cargo run --bin contact-relay
//! ```

mod config;

use anyhow::Context;
use config::Config;
use contact_relay_core::Relay;
use contact_relay_providers::{MailgunMailer, RecaptchaVerifier};
use contact_relay_web::build_router;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contact_relay=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting contact relay");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        verify_endpoint = %config.relay.verification.endpoint,
        messages_url = %config.relay.mail.messages_url(),
        recipients = config.relay.mail.recipients.len(),
        timeout_secs = config.relay.verification.timeout.as_secs(),
        "Configuration loaded"
    );

    if let Some(addr) = config.server.metrics_addr {
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .context("Failed to install Prometheus exporter")?;
        info!(address = %addr, "Prometheus metrics available at /metrics");
    } else {
        warn!("METRICS_ADDR not set, metrics exporter disabled");
    }

    let verifier = RecaptchaVerifier::new(&config.relay.verification)
        .context("Failed to build verification client")?;
    let mailer =
        MailgunMailer::new(&config.relay.mail).context("Failed to build mail client")?;
    let relay = Relay::new(&config.relay, verifier, mailer);

    let app = build_router(relay);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
///
/// If a handler cannot be installed, that signal source is ignored and the
/// other one still applies.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
