use std::fmt;

/// Attribute holding the record key in the fragment table.
pub const RECORD_KEY_ATTRIBUTE: &str = "PK";
/// Attribute holding the fragment text in the fragment table.
pub const FRAGMENT_ATTRIBUTE: &str = "data";

pub const LETTER_OBJECT_EXTENSION: &str = "txt";

/// Which of the two fragments a lookup is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupTarget {
    Customer,
    Document,
}

impl LookupTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Document => "document",
        }
    }

    fn record_prefix(self) -> &'static str {
        match self {
            Self::Customer => "C#",
            Self::Document => "D#",
        }
    }
}

impl fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical key of a stored fragment.
///
/// Identifiers are caller-supplied and untrusted; they are embedded in the
/// record key as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FragmentKey {
    Customer(String),
    Document(String),
}

impl FragmentKey {
    pub fn customer(id: impl Into<String>) -> Self {
        Self::Customer(id.into())
    }

    pub fn document(doc_type: impl Into<String>) -> Self {
        Self::Document(doc_type.into())
    }

    pub fn target(&self) -> LookupTarget {
        match self {
            Self::Customer(_) => LookupTarget::Customer,
            Self::Document(_) => LookupTarget::Document,
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Self::Customer(id) => id,
            Self::Document(doc_type) => doc_type,
        }
    }

    /// Primary key of the backing record, e.g. `C#cust-1` or `D#welcome`.
    pub fn record_key(&self) -> String {
        format!("{}{}", self.target().record_prefix(), self.identifier())
    }
}

impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.target(), self.identifier())
    }
}

/// Object key for a composed letter: `<customer_id>/<doc_type>.txt`.
///
/// Stable for a given pair, so repeated requests overwrite the same object.
pub fn letter_object_key(customer_id: &str, doc_type: &str) -> String {
    format!("{customer_id}/{doc_type}.{LETTER_OBJECT_EXTENSION}")
}
