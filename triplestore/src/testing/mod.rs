use std::time::Duration;

use tempfile::TempDir;

use crate::config::StoreConfig;
use crate::engine::{FaultConfig, MemoryEngine, RedbEngine};
use crate::retry::RetryPolicy;
use crate::store::TripleStore;

/// Create an empty in-memory store.
pub fn new_test_store() -> TripleStore<MemoryEngine> {
    TripleStore::in_memory()
}

/// Create an in-memory store with fault injection and fast retries.
///
/// The seed makes random faults deterministic.
pub fn new_faulty_store(seed: u64, faults: FaultConfig) -> TripleStore<MemoryEngine> {
    TripleStore::with_engine(MemoryEngine::with_faults(seed, faults), &StoreConfig::default())
        .with_retry_policy(RetryPolicy {
            max_retries: StoreConfig::DEFAULT_MAX_WRITE_RETRIES,
            base_delay: Duration::from_micros(50),
        })
}

/// Create an on-disk store in a fresh temporary directory.
///
/// The directory is removed when the returned guard is dropped, so keep it
/// alive for as long as the store is used.
pub fn new_disk_store() -> (TempDir, TripleStore<RedbEngine>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = TripleStore::open(dir.path()).expect("Failed to open store");
    (dir, store)
}
