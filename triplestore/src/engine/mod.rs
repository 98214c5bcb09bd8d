//! Abstraction over the transactional, ordered key-value engine.
//!
//! The triple store never touches storage directly. It needs:
//! - Read-only and read-write transactions
//! - Point `get` and `set` on byte-string keys
//! - Forward iteration over every key sharing a prefix
//! - Atomic commit, and discard on abort or drop
//!
//! # Implementations
//!
//! - `RedbEngine`: persistent, backed by a single redb file.
//! - `MemoryEngine`: in-memory with snapshot isolation and fault injection,
//!   for tests.
//!
//! Both implementations admit one writer at a time. Readers never block and
//! always see the last committed state as of `begin_read`.

mod memory;
mod redb_engine;

pub use memory::{FaultConfig, MemoryEngine, MemoryEngineStats, MemoryReadTxn, MemoryWriteTxn};
pub use redb_engine::{RedbEngine, RedbReadTxn, RedbWriteTxn};

/// Errors raised by an engine.
#[derive(Debug)]
pub enum EngineError {
    /// Error from the redb backend.
    Redb(redb::Error),
    /// I/O error outside the backend (e.g. creating the data directory).
    Io(std::io::Error),
    /// The engine refused to commit because of a concurrent conflict.
    Conflict,
    /// A lock guarding engine state was poisoned by a panicking thread.
    Poisoned,
    /// Injected fault for simulation.
    InjectedFault(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Redb(e) => write!(f, "redb error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Conflict => write!(f, "transaction conflict"),
            Self::Poisoned => write!(f, "engine lock poisoned"),
            Self::InjectedFault(msg) => write!(f, "injected fault: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Redb(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl<T> From<std::sync::PoisonError<T>> for EngineError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// A consistent read view of the key space.
pub trait ReadTxn {
    /// Look up a single key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError>;

    /// Collect every key that starts with `prefix`, in ascending order.
    ///
    /// An empty prefix returns the whole key space.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>, EngineError>;
}

/// A read-write transaction.
///
/// Reads observe the transaction's own writes. Nothing is visible to other
/// transactions until `commit` succeeds. Dropping without committing
/// discards every write.
pub trait WriteTxn: ReadTxn {
    /// Set a key, overwriting any previous value.
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), EngineError>;

    /// Atomically publish every write.
    fn commit(self) -> Result<(), EngineError>
    where
        Self: Sized;

    /// Discard every write.
    fn abort(self) -> Result<(), EngineError>
    where
        Self: Sized;
}

/// An ordered, transactional key-value engine.
pub trait Engine: Send + Sync {
    /// Read-only transaction type.
    type Read<'e>: ReadTxn
    where
        Self: 'e;

    /// Read-write transaction type.
    type Write<'e>: WriteTxn
    where
        Self: 'e;

    /// Begin a read-only transaction on the latest committed state.
    fn begin_read(&self) -> Result<Self::Read<'_>, EngineError>;

    /// Begin a read-write transaction. Blocks while another writer is active.
    fn begin_write(&self) -> Result<Self::Write<'_>, EngineError>;
}
