//! Recording mock providers.
//!
//! Both mocks are cheap to clone and share their state, so a test can keep a
//! handle after moving one into a [`Relay`](contact_relay_core::Relay) and
//! later assert on what the relay asked of it.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)]

use contact_relay_core::{EmailDispatchRequest, HumanVerifier, MailDispatcher, ProviderOutcome};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Verification provider that answers with a fixed outcome and records tokens.
///
/// # Example
///
/// ```
/// use contact_relay_testing::MockVerifier;
/// use contact_relay_core::{HumanVerifier, ProviderOutcome};
///
/// # tokio_test::block_on(async {
/// let verifier = MockVerifier::rejecting("invalid-input-response");
/// let outcome = verifier.verify("token").await;
/// assert!(!outcome.is_accepted());
/// assert_eq!(verifier.tokens(), vec!["token".to_string()]);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockVerifier {
    outcome: ProviderOutcome,
    tokens: Arc<Mutex<Vec<String>>>,
}

impl MockVerifier {
    /// Mock that answers with `outcome` for every token.
    #[must_use]
    pub fn new(outcome: ProviderOutcome) -> Self {
        Self {
            outcome,
            tokens: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mock that accepts every token.
    #[must_use]
    pub fn accepting() -> Self {
        Self::new(ProviderOutcome::Accepted)
    }

    /// Mock that rejects every token.
    #[must_use]
    pub fn rejecting(reason: &str) -> Self {
        Self::new(ProviderOutcome::rejected(reason))
    }

    /// Mock that behaves as if the provider were down.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::new(ProviderOutcome::unreachable("connection refused"))
    }

    /// Tokens seen so far, in call order.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    /// Number of verification calls.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

impl HumanVerifier for MockVerifier {
    fn verify(&self, token: &str) -> impl Future<Output = ProviderOutcome> + Send {
        self.tokens.lock().unwrap().push(token.to_string());
        let outcome = self.outcome.clone();
        async move { outcome }
    }
}

/// Mail provider that answers with a fixed outcome and records every message.
#[derive(Debug, Clone)]
pub struct MockMailer {
    outcome: ProviderOutcome,
    sent: Arc<Mutex<Vec<EmailDispatchRequest>>>,
}

impl MockMailer {
    /// Mock that answers with `outcome` for every message.
    #[must_use]
    pub fn new(outcome: ProviderOutcome) -> Self {
        Self {
            outcome,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mock that accepts every message.
    #[must_use]
    pub fn accepting() -> Self {
        Self::new(ProviderOutcome::Accepted)
    }

    /// Mock that rejects every message, like a 4xx from the provider.
    #[must_use]
    pub fn rejecting(reason: &str) -> Self {
        Self::new(ProviderOutcome::rejected(reason))
    }

    /// Mock that behaves as if the provider were down.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::new(ProviderOutcome::unreachable("connection refused"))
    }

    /// Messages handed to the mock, in call order.
    #[must_use]
    pub fn dispatched(&self) -> Vec<EmailDispatchRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of dispatch calls.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl MailDispatcher for MockMailer {
    fn dispatch(
        &self,
        email: &EmailDispatchRequest,
    ) -> impl Future<Output = ProviderOutcome> + Send {
        self.sent.lock().unwrap().push(email.clone());
        let outcome = self.outcome.clone();
        async move { outcome }
    }
}
