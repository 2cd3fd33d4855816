use sha2::{Digest, Sha256};

use crate::fragment::Fragment;

pub const LETTER_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// A composed letter. Lives only for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    text: String,
}

impl Letter {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.text.into_bytes()
    }

    /// Hex SHA-256 of the UTF-8 body.
    pub fn sha256_hex(&self) -> String {
        content_sha256_hex(self.as_bytes())
    }
}

/// Formats `Dear {customer};\n{document}` with no trailing newline.
pub fn compose_letter(customer: &Fragment, document: &Fragment) -> Letter {
    Letter {
        text: format!("Dear {};\n{}", customer.as_str(), document.as_str()),
    }
}

pub fn content_sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
