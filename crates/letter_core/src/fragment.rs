use std::fmt;

use crate::storage_keys::FragmentKey;

/// Text payload of a stored fragment, returned verbatim from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Failure to read a fragment. Absence is not an error and never appears here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentStoreError {
    /// Timeout, throttling or connectivity fault in the backing store.
    Unavailable { key: FragmentKey, message: String },
    /// The record exists but its fragment attribute is missing or not text.
    MalformedRecord { key: FragmentKey, message: String },
}

impl FragmentStoreError {
    pub fn unavailable(key: &FragmentKey, message: impl Into<String>) -> Self {
        Self::Unavailable {
            key: key.clone(),
            message: message.into(),
        }
    }

    pub fn malformed(key: &FragmentKey, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            key: key.clone(),
            message: message.into(),
        }
    }

    pub fn key(&self) -> &FragmentKey {
        match self {
            Self::Unavailable { key, .. } | Self::MalformedRecord { key, .. } => key,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

impl fmt::Display for FragmentStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { key, message } => {
                write!(f, "fragment store unavailable for {key}: {message}")
            }
            Self::MalformedRecord { key, message } => {
                write!(f, "malformed fragment record for {key}: {message}")
            }
        }
    }
}

impl std::error::Error for FragmentStoreError {}
