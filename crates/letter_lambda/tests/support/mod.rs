use std::collections::HashMap;
use std::sync::Mutex;

use letter_lambda::adapters::fragment_store::FragmentStore;
use letter_lambda::adapters::object_store::{LetterStore, LetterWrite, ServerSideEncryption};
use letter_lambda::runtime::fragment::{Fragment, FragmentStoreError};
use letter_lambda::runtime::storage_keys::FragmentKey;
use serde_json::Value;

pub const SAMPLE_EVENT: &str = include_str!("../events/sample_event.json");

pub fn sample_event() -> Value {
    serde_json::from_str(SAMPLE_EVENT).expect("sample event should parse")
}

pub fn event_for(doc_type: &str, customer_id: &str) -> Value {
    let mut event = sample_event();
    event["pathParameters"]["docType"] = Value::from(doc_type);
    event["pathParameters"]["customerId"] = Value::from(customer_id);
    event
}

/// In-memory fragment table keyed by record key (`C#...`, `D#...`).
#[derive(Default)]
pub struct InMemoryFragmentTable {
    records: Mutex<HashMap<String, String>>,
}

impl InMemoryFragmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_item(&self, record_key: &str, data: &str) {
        self.records
            .lock()
            .expect("poisoned mutex")
            .insert(record_key.to_string(), data.to_string());
    }

    pub fn seeded() -> Self {
        let table = Self::new();
        table.put_item("D#UnitTestDoc", "Unit Test Doc Corpi");
        table.put_item("C#UnitTestCust", "Unit Test Customer");
        table
    }
}

impl FragmentStore for InMemoryFragmentTable {
    fn lookup(&self, key: &FragmentKey) -> Result<Option<Fragment>, FragmentStoreError> {
        Ok(self
            .records
            .lock()
            .expect("poisoned mutex")
            .get(&key.record_key())
            .map(|text| Fragment::new(text.clone())))
    }
}

/// Fragment store whose backend never answers in time.
pub struct TimedOutFragmentTable;

impl FragmentStore for TimedOutFragmentTable {
    fn lookup(&self, key: &FragmentKey) -> Result<Option<Fragment>, FragmentStoreError> {
        Err(FragmentStoreError::unavailable(
            key,
            "dispatch failure: operation timed out",
        ))
    }
}

/// Bucket double that refuses any write not carrying the required
/// server-side encryption and records the encryption of accepted writes.
pub struct EncryptedBucket {
    required: ServerSideEncryption,
    objects: Mutex<HashMap<String, Vec<u8>>>,
    accepted: Mutex<Vec<(String, ServerSideEncryption)>>,
    rejected: Mutex<Vec<String>>,
}

impl EncryptedBucket {
    pub fn requiring(required: ServerSideEncryption) -> Self {
        Self {
            required,
            objects: Mutex::new(HashMap::new()),
            accepted: Mutex::new(Vec::new()),
            rejected: Mutex::new(Vec::new()),
        }
    }

    pub fn aes256() -> Self {
        Self::requiring(ServerSideEncryption::Aes256)
    }

    pub fn body(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .get(key)
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().expect("poisoned mutex").len()
    }

    pub fn accepted(&self) -> Vec<(String, ServerSideEncryption)> {
        self.accepted.lock().expect("poisoned mutex").clone()
    }

    pub fn rejected(&self) -> Vec<String> {
        self.rejected.lock().expect("poisoned mutex").clone()
    }
}

impl LetterStore for EncryptedBucket {
    fn put_letter(&self, write: &LetterWrite) -> Result<(), String> {
        if write.encryption() != &self.required {
            self.rejected
                .lock()
                .expect("poisoned mutex")
                .push(write.key().to_string());
            return Err(format!(
                "AccessDenied: bucket policy requires {} encryption",
                self.required.as_str()
            ));
        }

        self.objects
            .lock()
            .expect("poisoned mutex")
            .insert(write.key().to_string(), write.body().to_vec());
        self.accepted
            .lock()
            .expect("poisoned mutex")
            .push((write.key().to_string(), write.encryption().clone()));
        Ok(())
    }
}

/// Bucket double whose writes always fail.
pub struct UnwritableBucket;

impl LetterStore for UnwritableBucket {
    fn put_letter(&self, write: &LetterWrite) -> Result<(), String> {
        Err(format!("NoSuchBucket: cannot write {}", write.key()))
    }
}
