//! Submission counter: every finished request is counted exactly once.

#![allow(clippy::unwrap_used)]

use contact_relay_core::relay::SUBMISSIONS_METRIC;
use contact_relay_core::{Relay, RelayError, unreadable_body};
use contact_relay_testing::{MockMailer, MockVerifier, fixtures};
use metrics::{
    Counter, CounterFn, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
};
use std::sync::{Arc, Mutex};

/// Collects the `outcome` label of every submission counter increment.
#[derive(Default)]
struct OutcomeRecorder {
    outcomes: Arc<Mutex<Vec<String>>>,
}

struct OutcomeCounter {
    outcome: String,
    sink: Arc<Mutex<Vec<String>>>,
}

impl CounterFn for OutcomeCounter {
    fn increment(&self, value: u64) {
        let mut sink = self.sink.lock().unwrap();
        for _ in 0..value {
            sink.push(self.outcome.clone());
        }
    }

    fn absolute(&self, _value: u64) {}
}

impl Recorder for OutcomeRecorder {
    fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
    fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
    fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

    fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
        if key.name() != SUBMISSIONS_METRIC {
            return Counter::noop();
        }
        let outcome = key
            .labels()
            .find(|label| label.key() == "outcome")
            .map(|label| label.value().to_string())
            .unwrap_or_default();
        Counter::from_arc(Arc::new(OutcomeCounter {
            outcome,
            sink: Arc::clone(&self.outcomes),
        }))
    }

    fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
        Gauge::noop()
    }

    fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
        Histogram::noop()
    }
}

impl OutcomeRecorder {
    fn outcomes(&self) -> Vec<String> {
        self.outcomes.lock().unwrap().clone()
    }
}

#[test]
fn test_each_outcome_is_counted_once() {
    let recorder = OutcomeRecorder::default();

    metrics::with_local_recorder(&recorder, || {
        tokio_test::block_on(async {
            let sent = Relay::new(
                &fixtures::relay_config(),
                MockVerifier::accepting(),
                MockMailer::accepting(),
            );
            sent.handle(&fixtures::valid_body()).await.unwrap();
            let _ = sent.handle(b"not json").await;

            let refused = Relay::new(
                &fixtures::relay_config(),
                MockVerifier::rejecting("invalid-input-response"),
                MockMailer::accepting(),
            );
            let _ = refused.handle(&fixtures::valid_body()).await;
        });
    });

    assert_eq!(
        recorder.outcomes(),
        vec!["sent", "malformed", "verification_failed"]
    );
}

#[test]
fn test_unreadable_body_is_counted_as_malformed() {
    let recorder = OutcomeRecorder::default();

    let err = metrics::with_local_recorder(&recorder, || {
        unreadable_body("length limit exceeded")
    });

    assert!(matches!(err, RelayError::MalformedRequest(ref detail) if detail == "length limit exceeded"));
    assert_eq!(recorder.outcomes(), vec!["malformed"]);
}
