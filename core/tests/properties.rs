//! Property tests over generated submissions.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use contact_relay_core::submission::PHONE_FALLBACK;
use contact_relay_core::{Relay, RelayError};
use contact_relay_testing::{MockMailer, MockVerifier, fixtures};
use proptest::prelude::*;
use serde_json::{Value, json};

const REQUIRED: [&str; 4] = ["name", "email", "message", "recaptchaResponse"];

fn blank() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), "[ \t\r\n]{0,4}".prop_map(Some)]
}

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9ñáé][A-Za-z0-9ñáé .,!?@\n]{0,40}"
}

fn address() -> impl Strategy<Value = String> {
    "[a-z0-9.]{1,12}@[a-z]{1,8}\\.com"
}

proptest! {
    #[test]
    fn missing_required_field_never_calls_providers(
        field in prop::sample::select(REQUIRED.to_vec()),
        replacement in blank(),
    ) {
        let mut form = fixtures::valid_form();
        match replacement {
            Some(value) => form[field] = Value::String(value),
            None => { form.as_object_mut().unwrap().remove(field); }
        }

        let verifier = MockVerifier::accepting();
        let mailer = MockMailer::accepting();
        let relay = Relay::new(&fixtures::relay_config(), verifier.clone(), mailer.clone());

        let result = tokio_test::block_on(relay.handle(form.to_string().as_bytes()));

        prop_assert_eq!(result.unwrap_err(), RelayError::MissingFields);
        prop_assert_eq!(verifier.calls(), 0);
        prop_assert_eq!(mailer.calls(), 0);
    }

    #[test]
    fn text_body_contains_submitted_fields(
        name in text(),
        email in address(),
        message in text(),
        phone in prop::option::of(text()),
    ) {
        let mut form = json!({
            "name": name,
            "email": email,
            "message": message,
            "recaptchaResponse": "tok",
        });
        if let Some(phone) = &phone {
            form["phone"] = json!(phone);
        }

        let relay = Relay::new(
            &fixtures::relay_config(),
            MockVerifier::accepting(),
            MockMailer::accepting(),
        );
        let delivery = tokio_test::block_on(relay.handle(form.to_string().as_bytes())).unwrap();
        let text = &delivery.email.text;

        prop_assert!(text.contains(&name));
        prop_assert!(text.contains(&email));
        prop_assert!(text.contains(&message));
        prop_assert!(text.contains(phone.as_deref().unwrap_or(PHONE_FALLBACK)));
        prop_assert_eq!(&delivery.email.reply_to, &email);
    }
}
