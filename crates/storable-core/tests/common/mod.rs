use std::sync::Arc;
use storable_core::{HostStorage, MemoryStorage, StorageScope, StorageService};

/// Session wrapper plus a handle on its host primitive
///
/// The host handle lets tests write raw text that bypasses encoding.
#[allow(dead_code)]
pub fn new_session_store() -> (StorageService, Arc<MemoryStorage>) {
    let host = Arc::new(MemoryStorage::new());
    let service = StorageService::new(
        StorageScope::Session,
        Arc::clone(&host) as Arc<dyn HostStorage>,
    );
    (service, host)
}

/// Session wrapper over a store with the given quota
#[allow(dead_code)]
pub fn new_store_with_quota(quota: usize) -> StorageService {
    StorageService::session(Arc::new(MemoryStorage::with_quota(Some(quota))))
}
