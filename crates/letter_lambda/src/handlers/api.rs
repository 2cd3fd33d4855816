use serde_json::{json, Value};

use crate::adapters::fragment_store::FragmentStore;
use crate::adapters::object_store::LetterStore;
use crate::handlers::compose::{compose_letter_outcome, ComposeConfig};
use crate::logging::{log_error, log_info};
use crate::runtime::contract::{letter_request_from_event, validate_response, LetterResponse};

const COMPONENT: &str = "letter_handler";

/// Runs one API Gateway event through the inbound gate, the composer and the
/// outbound gate.
pub fn handle_letter_event(
    event: &Value,
    config: &ComposeConfig,
    fragments: &impl FragmentStore,
    letters: &impl LetterStore,
) -> LetterResponse {
    let request = match letter_request_from_event(event) {
        Ok(value) => value,
        Err(error) => {
            log_info(
                COMPONENT,
                "request_rejected",
                json!({ "error": error.message() }),
            );
            return LetterResponse::new(400, format!("INVALID: {}", error.message()));
        }
    };

    let response = compose_letter_outcome(&request, config, fragments, letters).to_response();

    match validate_response(&response) {
        Ok(()) => response,
        Err(error) => {
            log_error(
                COMPONENT,
                "response_rejected",
                json!({
                    "status_code": response.status_code,
                    "error": error.message(),
                }),
            );
            LetterResponse::new(500, format!("ERROR: invalid response: {}", error.message()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::adapters::object_store::LetterWrite;
    use crate::runtime::fragment::{Fragment, FragmentStoreError};
    use crate::runtime::storage_keys::FragmentKey;

    struct CountingFragmentStore {
        lookups: Mutex<usize>,
    }

    impl FragmentStore for CountingFragmentStore {
        fn lookup(&self, key: &FragmentKey) -> Result<Option<Fragment>, FragmentStoreError> {
            *self.lookups.lock().expect("poisoned mutex") += 1;
            Ok(Some(Fragment::new(key.identifier())))
        }
    }

    struct AcceptingStore;

    impl LetterStore for AcceptingStore {
        fn put_letter(&self, _write: &LetterWrite) -> Result<(), String> {
            Ok(())
        }
    }

    #[test]
    fn rejects_event_without_path_parameters_before_lookups() {
        let fragments = CountingFragmentStore {
            lookups: Mutex::new(0),
        };
        let response = handle_letter_event(
            &json!({"pathParameters": {"docType": "UnitTestDoc"}}),
            &ComposeConfig::default(),
            &fragments,
            &AcceptingStore,
        );

        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, "INVALID: customerId is required");
        assert_eq!(*fragments.lookups.lock().expect("poisoned mutex"), 0);
    }

    #[test]
    fn valid_event_returns_ok_with_location() {
        let fragments = CountingFragmentStore {
            lookups: Mutex::new(0),
        };
        let response = handle_letter_event(
            &json!({"pathParameters": {"docType": "Doc", "customerId": "Cust"}}),
            &ComposeConfig::default(),
            &fragments,
            &AcceptingStore,
        );

        assert_eq!(response, LetterResponse::new(200, "OK Cust/Doc.txt"));
        assert_eq!(*fragments.lookups.lock().expect("poisoned mutex"), 2);
    }
}
