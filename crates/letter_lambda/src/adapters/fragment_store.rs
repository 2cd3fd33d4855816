use crate::runtime::fragment::{Fragment, FragmentStoreError};
use crate::runtime::storage_keys::FragmentKey;

/// Read access to customer and document fragments.
///
/// `Ok(None)` means the record does not exist. Transport faults and timeouts
/// must be reported as `Err`, never as `Ok(None)`.
pub trait FragmentStore {
    fn lookup(&self, key: &FragmentKey) -> Result<Option<Fragment>, FragmentStoreError>;
}
