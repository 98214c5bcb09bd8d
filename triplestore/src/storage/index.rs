//! Triple index writes.
//!
//! A triple is stored as three empty-valued rows, one per ordering (see
//! `keys`). The rows are always written together in one transaction, so a
//! committed triple is visible through every ordering or through none.

use crate::engine::{ReadTxn, WriteTxn};
use crate::error::Error;
use crate::storage::keys::{IndexOrder, index_key};
use crate::types::Triple;

/// Triple index over a transaction.
pub struct TripleIndex<'t, T> {
    txn: &'t mut T,
}

impl<'t, T: WriteTxn> TripleIndex<'t, T> {
    #[must_use]
    pub const fn new(txn: &'t mut T) -> Self {
        Self { txn }
    }

    /// Write all three rows of a triple. Rewriting an existing triple is a
    /// no-op in effect.
    pub fn insert(&mut self, triple: &Triple) -> Result<(), Error> {
        for order in IndexOrder::ALL {
            self.txn.set(&index_key(order, triple), &[])?;
        }
        tracing::trace!("indexed {triple}");
        Ok(())
    }

    /// Check if a triple is present under the SPO ordering.
    #[cfg(test)]
    fn contains(&self, triple: &Triple) -> Result<bool, Error> {
        Ok(self.txn.get(&index_key(IndexOrder::Spo, triple))?.is_some())
    }
}
