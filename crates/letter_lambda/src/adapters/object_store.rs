use crate::runtime::letter::{Letter, LETTER_CONTENT_TYPE};

/// Server-side encryption requested on every letter write.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServerSideEncryption {
    #[default]
    Aes256,
    AwsKms { key_id: Option<String> },
}

impl ServerSideEncryption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256 => "AES256",
            Self::AwsKms { .. } => "aws:kms",
        }
    }

    pub fn kms_key_id(&self) -> Option<&str> {
        match self {
            Self::Aes256 => None,
            Self::AwsKms { key_id } => key_id.as_deref(),
        }
    }
}

/// A letter ready to be written. There is no constructor without an
/// encryption setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterWrite {
    key: String,
    body: Vec<u8>,
    sha256_hex: String,
    encryption: ServerSideEncryption,
}

impl LetterWrite {
    pub fn new(key: impl Into<String>, letter: Letter, encryption: ServerSideEncryption) -> Self {
        let sha256_hex = letter.sha256_hex();
        Self {
            key: key.into(),
            body: letter.into_bytes(),
            sha256_hex,
            encryption,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn content_type(&self) -> &'static str {
        LETTER_CONTENT_TYPE
    }

    pub fn sha256_hex(&self) -> &str {
        &self.sha256_hex
    }

    pub fn encryption(&self) -> &ServerSideEncryption {
        &self.encryption
    }
}

/// Write access to the letter bucket. Writing an existing key replaces it.
pub trait LetterStore {
    fn put_letter(&self, write: &LetterWrite) -> Result<(), String>;
}
