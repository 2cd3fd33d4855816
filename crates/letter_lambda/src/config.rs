use std::time::Duration;

use crate::adapters::object_store::ServerSideEncryption;
use crate::handlers::compose::{ComposeConfig, LookupPrecedence};

pub const TABLE_NAME_VAR: &str = "DYNAMODB_TABLE_NAME";
pub const BUCKET_NAME_VAR: &str = "S3_BUCKET_NAME";
pub const KMS_KEY_ID_VAR: &str = "LETTER_SSE_KMS_KEY_ID";
pub const STORE_TIMEOUT_MS_VAR: &str = "LETTER_STORE_TIMEOUT_MS";
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

/// Resource settings resolved once by the composition root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterServiceConfig {
    pub table_name: String,
    pub bucket: String,
    pub encryption: ServerSideEncryption,
    pub store_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

impl LetterServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = required_var(&lookup, TABLE_NAME_VAR)?;
        let bucket = required_var(&lookup, BUCKET_NAME_VAR)?;

        let encryption = match optional_var(&lookup, KMS_KEY_ID_VAR) {
            Some(key_id) => ServerSideEncryption::AwsKms {
                key_id: Some(key_id),
            },
            None => ServerSideEncryption::Aes256,
        };

        let store_timeout_ms = match optional_var(&lookup, STORE_TIMEOUT_MS_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) | Err(_) => {
                    return Err(ConfigError::new(format!(
                        "{STORE_TIMEOUT_MS_VAR} must be a positive integer, got '{raw}'"
                    )))
                }
                Ok(value) => value,
            },
            None => DEFAULT_STORE_TIMEOUT_MS,
        };

        Ok(Self {
            table_name,
            bucket,
            encryption,
            store_timeout: Duration::from_millis(store_timeout_ms),
        })
    }

    pub fn compose_config(&self) -> ComposeConfig {
        ComposeConfig {
            encryption: self.encryption.clone(),
            precedence: LookupPrecedence::default(),
        }
    }
}

fn required_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, ConfigError> {
    optional_var(lookup, name).ok_or_else(|| ConfigError::new(format!("{name} must be configured")))
}

fn optional_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
