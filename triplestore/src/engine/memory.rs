//! In-memory engine for tests.
//!
//! Committed state is an immutable `BTreeMap` behind an `Arc`. A read
//! transaction clones the `Arc` and so sees a fixed snapshot. A write
//! transaction buffers its writes and, on commit, publishes a new map that
//! contains the old state plus the buffer. Writers are serialized by a lock
//! held for the lifetime of the write transaction.
//!
//! Faults can be injected at two points:
//! - `set`: the write fails and the caller must abandon the transaction
//! - `commit`: the engine reports a conflict and discards the transaction

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Engine, EngineError, ReadTxn, WriteTxn};

type KeySpace = BTreeMap<Vec<u8>, Vec<u8>>;

/// Configuration for fault injection.
#[derive(Debug, Clone, Default)]
pub struct FaultConfig {
    /// Probability of a `set` failing (0.0 - 1.0).
    pub write_error_rate: f64,
    /// Probability of a commit reporting a conflict (0.0 - 1.0).
    pub commit_conflict_rate: f64,
    /// Fail exactly the n-th `set` call (1-based, counted across transactions).
    pub fail_write_number: Option<u64>,
    /// Report a conflict for this many commits before letting commits through.
    pub conflicting_commits: u64,
}

impl FaultConfig {
    /// Create a fault config with no faults.
    #[must_use]
    pub fn no_faults() -> Self {
        Self::default()
    }

    /// Fail the n-th `set` call.
    #[must_use]
    pub fn fail_nth_write(n: u64) -> Self {
        Self {
            fail_write_number: Some(n),
            ..Self::default()
        }
    }

    /// Reject the first `n` commits with a conflict.
    #[must_use]
    pub fn conflict_first_commits(n: u64) -> Self {
        Self {
            conflicting_commits: n,
            ..Self::default()
        }
    }
}

/// Statistics about engine operations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEngineStats {
    /// Number of `set` calls.
    pub writes: u64,
    /// Number of commit attempts.
    pub commits: u64,
    /// Number of injected write errors.
    pub injected_write_errors: u64,
    /// Number of injected commit conflicts.
    pub injected_conflicts: u64,
}

struct FaultState {
    config: FaultConfig,
    rng: StdRng,
    stats: MemoryEngineStats,
}

impl FaultState {
    /// Check if a fault should be injected based on the given rate.
    fn should_inject_fault(&mut self, rate: f64) -> bool {
        if rate <= 0.0 {
            return false;
        }
        self.rng.random::<f64>() < rate
    }

    fn on_write(&mut self) -> Result<(), EngineError> {
        self.stats.writes += 1;
        let forced = self.config.fail_write_number == Some(self.stats.writes);
        if forced || self.should_inject_fault(self.config.write_error_rate) {
            self.stats.injected_write_errors += 1;
            tracing::warn!("injecting write error on write #{}", self.stats.writes);
            return Err(EngineError::InjectedFault(
                "simulated write error".to_string(),
            ));
        }
        Ok(())
    }

    fn on_commit(&mut self) -> Result<(), EngineError> {
        self.stats.commits += 1;
        let forced = self.stats.injected_conflicts < self.config.conflicting_commits;
        if forced || self.should_inject_fault(self.config.commit_conflict_rate) {
            self.stats.injected_conflicts += 1;
            tracing::warn!("injecting conflict on commit #{}", self.stats.commits);
            return Err(EngineError::Conflict);
        }
        Ok(())
    }
}

/// In-memory engine with snapshot isolation.
pub struct MemoryEngine {
    committed: RwLock<Arc<KeySpace>>,
    writer: Mutex<()>,
    faults: Mutex<FaultState>,
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEngine {
    /// Create an empty engine with no faults.
    #[must_use]
    pub fn new() -> Self {
        Self::with_faults(0, FaultConfig::no_faults())
    }

    /// Create an empty engine with custom fault configuration.
    ///
    /// The seed makes random faults deterministic.
    #[must_use]
    pub fn with_faults(seed: u64, config: FaultConfig) -> Self {
        Self {
            committed: RwLock::new(Arc::new(KeySpace::new())),
            writer: Mutex::new(()),
            faults: Mutex::new(FaultState {
                config,
                rng: StdRng::seed_from_u64(seed),
                stats: MemoryEngineStats::default(),
            }),
        }
    }

    /// Update the fault configuration.
    pub fn set_fault_config(&self, config: FaultConfig) -> Result<(), EngineError> {
        self.faults.lock()?.config = config;
        Ok(())
    }

    /// Get the current statistics.
    pub fn stats(&self) -> Result<MemoryEngineStats, EngineError> {
        Ok(self.faults.lock()?.stats.clone())
    }

    /// Number of committed keys.
    pub fn len(&self) -> Result<usize, EngineError> {
        Ok(self.committed.read()?.len())
    }

    /// Whether nothing has been committed.
    pub fn is_empty(&self) -> Result<bool, EngineError> {
        Ok(self.len()? == 0)
    }

    fn snapshot(&self) -> Result<Arc<KeySpace>, EngineError> {
        Ok(Arc::clone(&*self.committed.read()?))
    }
}

impl Engine for MemoryEngine {
    type Read<'e> = MemoryReadTxn;
    type Write<'e> = MemoryWriteTxn<'e>;

    fn begin_read(&self) -> Result<Self::Read<'_>, EngineError> {
        Ok(MemoryReadTxn {
            snapshot: self.snapshot()?,
        })
    }

    fn begin_write(&self) -> Result<Self::Write<'_>, EngineError> {
        let guard = self.writer.lock()?;
        Ok(MemoryWriteTxn {
            engine: self,
            _writer: guard,
            base: self.snapshot()?,
            pending: KeySpace::new(),
        })
    }
}

/// Read transaction over a fixed snapshot.
pub struct MemoryReadTxn {
    snapshot: Arc<KeySpace>,
}

impl ReadTxn for MemoryReadTxn {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError> {
        Ok(self.snapshot.get(key).cloned())
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>, EngineError> {
        Ok(prefix_keys(&self.snapshot, prefix).cloned().collect())
    }
}

/// Write transaction holding the engine's writer lock.
pub struct MemoryWriteTxn<'e> {
    engine: &'e MemoryEngine,
    _writer: MutexGuard<'e, ()>,
    base: Arc<KeySpace>,
    pending: KeySpace,
}

impl ReadTxn for MemoryWriteTxn<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError> {
        Ok(self
            .pending
            .get(key)
            .or_else(|| self.base.get(key))
            .cloned())
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>, EngineError> {
        let mut keys: Vec<Vec<u8>> = prefix_keys(&self.base, prefix)
            .chain(prefix_keys(&self.pending, prefix))
            .cloned()
            .collect();
        keys.sort_unstable();
        keys.dedup();
        Ok(keys)
    }
}

impl WriteTxn for MemoryWriteTxn<'_> {
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), EngineError> {
        self.engine.faults.lock()?.on_write()?;
        self.pending.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn commit(self) -> Result<(), EngineError> {
        self.engine.faults.lock()?.on_commit()?;
        if self.pending.is_empty() {
            return Ok(());
        }

        let mut next = (*self.base).clone();
        next.extend(self.pending);
        *self.engine.committed.write()? = Arc::new(next);
        Ok(())
    }

    fn abort(self) -> Result<(), EngineError> {
        Ok(())
    }
}

fn prefix_keys<'a>(
    map: &'a KeySpace,
    prefix: &'a [u8],
) -> impl Iterator<Item = &'a Vec<u8>> + 'a {
    map.range(prefix.to_vec()..)
        .map(|(key, _)| key)
        .take_while(move |key| key.starts_with(prefix))
}
