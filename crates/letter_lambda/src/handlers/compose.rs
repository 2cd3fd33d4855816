use std::time::Instant;

use serde_json::json;

use crate::adapters::fragment_store::FragmentStore;
use crate::adapters::object_store::{LetterStore, LetterWrite, ServerSideEncryption};
use crate::logging::{log_error, log_info};
use crate::runtime::contract::LetterRequest;
use crate::runtime::fragment::{Fragment, FragmentStoreError};
use crate::runtime::letter::compose_letter;
use crate::runtime::outcome::Outcome;
use crate::runtime::storage_keys::FragmentKey;

const COMPONENT: &str = "letter_composer";

/// Which missing fragment is reported when more than one lookup did not
/// produce a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupPrecedence {
    #[default]
    CustomerFirst,
    DocumentFirst,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposeConfig {
    pub encryption: ServerSideEncryption,
    pub precedence: LookupPrecedence,
}

type LookupResult = Result<Option<Fragment>, FragmentStoreError>;

/// Looks up both fragments, composes the letter and writes it under
/// `<customer_id>/<doc_type>.txt`.
///
/// Both lookups complete before any decision is made. Missing records and
/// store faults come back as `Outcome` variants; nothing here panics or
/// retries.
pub fn compose_letter_outcome(
    request: &LetterRequest,
    config: &ComposeConfig,
    fragments: &impl FragmentStore,
    letters: &impl LetterStore,
) -> Outcome {
    let started_at = Instant::now();
    log_info(
        COMPONENT,
        "letter_requested",
        json!({
            "doc_type": request.doc_type.clone(),
            "customer_id": request.customer_id.clone(),
        }),
    );

    let customer_key = request.customer_key();
    let document_key = request.document_key();
    let customer_lookup = fragments.lookup(&customer_key);
    let document_lookup = fragments.lookup(&document_key);

    let (customer, document) = match join_lookups(
        settle(customer_key, customer_lookup),
        settle(document_key, document_lookup),
        config.precedence,
    ) {
        Ok(pair) => pair,
        Err(outcome) => {
            log_lookup_outcome(&outcome, started_at);
            return outcome;
        }
    };

    let location = request.object_key();
    let write = LetterWrite::new(
        location.clone(),
        compose_letter(&customer, &document),
        config.encryption.clone(),
    );

    match letters.put_letter(&write) {
        Ok(()) => {
            log_info(
                COMPONENT,
                "letter_persisted",
                json!({
                    "object_key": location.clone(),
                    "bytes": write.body().len(),
                    "sha256": write.sha256_hex(),
                    "encryption": write.encryption().as_str(),
                    "duration_ms": started_at.elapsed().as_millis(),
                }),
            );
            Outcome::Success { location }
        }
        Err(reason) => {
            log_error(
                COMPONENT,
                "letter_persist_failed",
                json!({
                    "object_key": location.clone(),
                    "duration_ms": started_at.elapsed().as_millis(),
                    "error": reason.clone(),
                }),
            );
            Outcome::PersistFailure { location, reason }
        }
    }
}

fn settle(key: FragmentKey, lookup: LookupResult) -> Result<Fragment, Outcome> {
    match lookup {
        Ok(Some(fragment)) => Ok(fragment),
        Ok(None) => Err(Outcome::NotFound(key)),
        Err(error) => Err(Outcome::StoreUnavailable(error)),
    }
}

fn join_lookups(
    customer: Result<Fragment, Outcome>,
    document: Result<Fragment, Outcome>,
    precedence: LookupPrecedence,
) -> Result<(Fragment, Fragment), Outcome> {
    match precedence {
        LookupPrecedence::CustomerFirst => {
            customer.and_then(|customer| document.map(|document| (customer, document)))
        }
        LookupPrecedence::DocumentFirst => {
            document.and_then(|document| customer.map(|customer| (customer, document)))
        }
    }
}

fn log_lookup_outcome(outcome: &Outcome, started_at: Instant) {
    match outcome {
        Outcome::NotFound(key) => log_info(
            COMPONENT,
            "fragment_not_found",
            json!({
                "fragment": key.to_string(),
                "duration_ms": started_at.elapsed().as_millis(),
            }),
        ),
        Outcome::StoreUnavailable(error) => log_error(
            COMPONENT,
            "fragment_lookup_failed",
            json!({
                "fragment": error.key().to_string(),
                "duration_ms": started_at.elapsed().as_millis(),
                "error": error.to_string(),
            }),
        ),
        Outcome::Success { .. } | Outcome::PersistFailure { .. } => {}
    }
}
