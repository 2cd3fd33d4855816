use crate::contract::LetterResponse;
use crate::fragment::FragmentStoreError;
use crate::storage_keys::{FragmentKey, LookupTarget};

pub const NOT_FOUND_MARKER: &str = "NOTFOUND";

/// Result of one composition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The letter was written to `location`.
    Success { location: String },
    /// The fragment for `key` has no record.
    NotFound(FragmentKey),
    /// A fragment could not be read; the record may or may not exist.
    StoreUnavailable(FragmentStoreError),
    /// Both fragments were found but the letter could not be written.
    PersistFailure { location: String, reason: String },
}

impl Outcome {
    pub fn not_found_target(&self) -> Option<LookupTarget> {
        match self {
            Self::NotFound(key) => Some(key.target()),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { .. } => 200,
            Self::NotFound(_) => 404,
            Self::StoreUnavailable(error) if error.is_unavailable() => 503,
            Self::StoreUnavailable(_) => 500,
            Self::PersistFailure { .. } => 500,
        }
    }

    pub fn to_response(&self) -> LetterResponse {
        let body = match self {
            Self::Success { location } => format!("OK {location}"),
            Self::NotFound(key) => format!("{NOT_FOUND_MARKER} {key}"),
            Self::StoreUnavailable(error) => format!("ERROR: {error}"),
            Self::PersistFailure { location, reason } => {
                format!("ERROR: failed to persist {location}: {reason}")
            }
        };
        LetterResponse::new(self.status_code(), body)
    }
}
