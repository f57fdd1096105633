//! Error types for provider construction.

use thiserror::Error;

/// Errors raised while building a provider client.
///
/// Calls to a built client never fail; see
/// [`ProviderOutcome`](contact_relay_core::ProviderOutcome).
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The underlying HTTP client could not be built (TLS backend, proxy settings).
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::ClientBuild(err.to_string())
    }
}
