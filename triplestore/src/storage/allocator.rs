//! Surrogate ID allocation from a durable, batched sequence.
//!
//! The sequence lease lives in the key space under `[0x07][name]` and holds
//! the next counter that has not been handed to any process. An allocator
//! reserves `bandwidth` counters at a time by advancing that row, then hands
//! them out from memory. Counters left in a lease when the process exits are
//! never used.
//!
//! # Transaction coupling
//!
//! A lease refill is written inside the caller's write transaction, so it
//! only becomes durable if that transaction commits. Allocation therefore
//! happens in an `Allocation` session that holds the allocator exclusively:
//! - begin the session before the write transaction, finish it after
//! - `commit` once the transaction has committed: keep the new lease
//! - drop without committing: any refill is discarded, and counters handed
//!   out from the previous lease are spent
//!
//! No other writer can observe a lease whose refill is still undecided.

use std::sync::{Mutex, MutexGuard};

use crate::constants::{DEFAULT_SEQUENCE_BANDWIDTH, VALUE_SEQUENCE};
use crate::engine::{EngineError, WriteTxn};
use crate::error::Error;
use crate::storage::keys::sequence_key;

/// Hands out monotonically increasing counters.
///
/// Counters are unique across process restarts. They are never reused, but
/// there may be gaps.
pub trait IdAllocator: Send + Sync {
    /// Start allocating for one write transaction.
    ///
    /// Blocks while another session is active.
    fn begin(&self) -> Result<Box<dyn Allocation + '_>, Error>;
}

/// Exclusive use of an allocator for the span of one write transaction.
///
/// Dropping a session without committing it discards it.
pub trait Allocation {
    /// Take the next counter. Any durable bookkeeping is written to `txn`.
    fn allocate(&mut self, txn: &mut dyn WriteTxn) -> Result<u64, Error>;

    /// The transaction passed to `allocate` committed.
    fn commit(self: Box<Self>);
}

/// In-memory window of leased counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Lease {
    /// Next counter to hand out.
    next: u64,
    /// One past the last leased counter.
    limit: u64,
}

impl Lease {
    const fn is_spent(&self) -> bool {
        self.next >= self.limit
    }
}

/// Allocator backed by a named lease row.
#[derive(Debug)]
pub struct SequenceAllocator {
    key: Vec<u8>,
    bandwidth: u64,
    lease: Mutex<Lease>,
}

impl SequenceAllocator {
    /// Create an allocator for the named sequence.
    ///
    /// A bandwidth of zero is treated as one.
    #[must_use]
    pub fn new(name: &str, bandwidth: u64) -> Self {
        Self {
            key: sequence_key(name),
            bandwidth: bandwidth.max(1),
            lease: Mutex::new(Lease::default()),
        }
    }

    /// Allocator for the value dictionary.
    #[must_use]
    pub fn for_values(bandwidth: u64) -> Self {
        Self::new(VALUE_SEQUENCE, bandwidth)
    }

    /// Number of counters reserved per refill.
    #[must_use]
    pub const fn bandwidth(&self) -> u64 {
        self.bandwidth
    }

    fn refill(&self, txn: &mut dyn WriteTxn) -> Result<Lease, Error> {
        let start = match txn.get(&self.key)? {
            Some(bytes) => {
                let bytes: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    Error::CorruptRecord(format!(
                        "sequence lease has {} bytes, expected 8",
                        bytes.len()
                    ))
                })?;
                u64::from_le_bytes(bytes)
            }
            None => 0,
        };
        let limit = start
            .checked_add(self.bandwidth)
            .ok_or(Error::IdSpaceExhausted)?;
        txn.set(&self.key, &limit.to_le_bytes())?;

        tracing::debug!("leased sequence counters [{start}, {limit})");
        Ok(Lease { next: start, limit })
    }
}

impl Default for SequenceAllocator {
    fn default() -> Self {
        Self::for_values(DEFAULT_SEQUENCE_BANDWIDTH)
    }
}

impl IdAllocator for SequenceAllocator {
    fn begin(&self) -> Result<Box<dyn Allocation + '_>, Error> {
        let lease = self.lease.lock().map_err(EngineError::from)?;
        Ok(Box::new(SequenceSession {
            allocator: self,
            staged: *lease,
            lease,
            refilled: false,
            committed: false,
        }))
    }
}

/// Session over a `SequenceAllocator`. Counters come from a staged copy of
/// the lease, which replaces the shared one only on commit.
struct SequenceSession<'a> {
    allocator: &'a SequenceAllocator,
    lease: MutexGuard<'a, Lease>,
    staged: Lease,
    refilled: bool,
    committed: bool,
}

impl Allocation for SequenceSession<'_> {
    fn allocate(&mut self, txn: &mut dyn WriteTxn) -> Result<u64, Error> {
        if self.staged.is_spent() {
            self.staged = self.allocator.refill(txn)?;
            self.refilled = true;
        }
        let counter = self.staged.next;
        self.staged.next += 1;
        Ok(counter)
    }

    fn commit(mut self: Box<Self>) {
        *self.lease = self.staged;
        self.committed = true;
    }
}

impl Drop for SequenceSession<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if self.refilled {
            tracing::debug!(
                "dropping uncommitted lease [{}, {})",
                self.staged.next,
                self.staged.limit
            );
            self.lease.next = self.lease.limit;
        } else {
            self.lease.next = self.staged.next;
        }
    }
}
