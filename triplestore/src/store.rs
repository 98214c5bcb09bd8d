//! The public store: interning, indexing, and querying triples.
//!
//! # Writes
//!
//! `put` resolves all three values (creating them if needed) and writes the
//! three index rows inside one engine transaction. Either everything is
//! committed or nothing is. Conflicts are retried per the store's
//! `RetryPolicy`.
//!
//! # Reads
//!
//! Every read runs in a read-only snapshot. `snapshot()` exposes that
//! snapshot so several reads can share one consistent view.

use std::path::Path;

use crate::config::StoreConfig;
use crate::engine::{Engine, EngineError, MemoryEngine, RedbEngine, WriteTxn};
use crate::error::Error;
use crate::query::{self, Matches, TripleMatches};
use crate::retry::RetryPolicy;
use crate::storage::{Allocation, IdAllocator, SequenceAllocator, TripleIndex, dictionary};
use crate::types::{Pattern, SurrogateId, Triple, Value};

/// A triple store over an engine.
pub struct TripleStore<E: Engine = RedbEngine> {
    engine: E,
    allocator: Box<dyn IdAllocator>,
    retry: RetryPolicy,
}

impl TripleStore<RedbEngine> {
    /// Open or create a store in `directory` with default settings.
    pub fn open(directory: impl AsRef<Path>) -> Result<Self, Error> {
        Self::open_with_config(&StoreConfig::with_data_directory(directory.as_ref()))
    }

    /// Open or create a store as configured.
    ///
    /// # Post-conditions
    ///
    /// - `config.data_directory` exists
    /// - the store file at `config.database_path()` exists
    pub fn open_with_config(config: &StoreConfig) -> Result<Self, Error> {
        std::fs::create_dir_all(&config.data_directory).map_err(EngineError::from)?;
        let engine = RedbEngine::open(&config.database_path())?;
        tracing::info!("opened store at {}", engine.path().display());
        Ok(Self::with_engine(engine, config))
    }
}

impl TripleStore<MemoryEngine> {
    /// Create an empty store that lives in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_engine(MemoryEngine::new(), &StoreConfig::default())
    }
}

impl<E: Engine> TripleStore<E> {
    /// Create a store over an already opened engine.
    #[must_use]
    pub fn with_engine(engine: E, config: &StoreConfig) -> Self {
        Self {
            engine,
            allocator: Box::new(SequenceAllocator::for_values(config.sequence_bandwidth)),
            retry: RetryPolicy::from_config(config),
        }
    }

    /// Replace the ID allocator.
    #[must_use]
    pub fn with_allocator(mut self, allocator: Box<dyn IdAllocator>) -> Self {
        self.allocator = allocator;
        self
    }

    /// Replace the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The underlying engine.
    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Release the store. Unused leased IDs are abandoned.
    pub fn close(self) {
        tracing::info!("closing store");
        drop(self);
    }

    /// Store a triple, interning any values not seen before.
    ///
    /// Storing a triple that already exists has no effect. Returns the IDs
    /// the triple was stored under.
    pub fn put(
        &self,
        subject: impl Into<Value>,
        predicate: impl Into<Value>,
        object: impl Into<Value>,
    ) -> Result<Triple, Error> {
        let values = [subject.into(), predicate.into(), object.into()];
        self.retry.run("put", || self.put_once(&values))
    }

    fn put_once(&self, values: &[Value; 3]) -> Result<Triple, Error> {
        // The session outlives the transaction so that no other writer can
        // allocate from a lease before its refill is committed or dropped.
        let mut allocation = self.allocator.begin()?;
        let mut txn = self.engine.begin_write()?;
        let written = Self::write_triple(&mut txn, allocation.as_mut(), values);

        let triple = match written {
            Ok(triple) => triple,
            Err(e) => {
                if let Err(abort_error) = txn.abort() {
                    tracing::warn!("failed to abort write: {abort_error}");
                }
                return Err(e);
            }
        };

        txn.commit()?;
        allocation.commit();
        tracing::debug!("stored {triple}");
        Ok(triple)
    }

    fn write_triple<T: WriteTxn>(
        txn: &mut T,
        allocation: &mut dyn Allocation,
        values: &[Value; 3],
    ) -> Result<Triple, Error> {
        let [subject, predicate, object] = values;
        let triple = Triple::new(
            dictionary::resolve(txn, allocation, subject, true)?,
            dictionary::resolve(txn, allocation, predicate, true)?,
            dictionary::resolve(txn, allocation, object, true)?,
        );
        TripleIndex::new(txn).insert(&triple)?;
        Ok(triple)
    }

    /// Open a read-only snapshot.
    pub fn snapshot(&self) -> Result<Snapshot<'_, E>, Error> {
        Ok(Snapshot {
            txn: self.engine.begin_read()?,
        })
    }

    /// Look up IDs matching a pattern with at least two bound positions.
    ///
    /// See [`Snapshot::get`].
    pub fn get(
        &self,
        subject: impl Into<Pattern>,
        predicate: impl Into<Pattern>,
        object: impl Into<Pattern>,
    ) -> Result<Vec<SurrogateId>, Error> {
        self.snapshot()?.get(subject, predicate, object)
    }

    /// Scan whole triples matching any pattern.
    pub fn triples(
        &self,
        subject: impl Into<Pattern>,
        predicate: impl Into<Pattern>,
        object: impl Into<Pattern>,
    ) -> Result<Vec<Triple>, Error> {
        self.snapshot()?.triples(subject, predicate, object)
    }

    /// The ID of a value, if it has been stored.
    pub fn lookup(&self, value: &Value) -> Result<Option<SurrogateId>, Error> {
        self.snapshot()?.lookup(value)
    }

    /// Turn IDs back into values. Any failure fails the whole batch.
    pub fn materialize(&self, ids: &[SurrogateId]) -> Result<Vec<Value>, Error> {
        self.snapshot()?.materialize(ids)
    }

    /// Turn IDs back into values, reporting failures per ID.
    pub fn materialize_each(&self, ids: &[SurrogateId]) -> Result<Vec<Result<Value, Error>>, Error> {
        Ok(self.snapshot()?.materialize_each(ids))
    }
}

/// A consistent read-only view of the store.
pub struct Snapshot<'s, E: Engine + 's> {
    txn: E::Read<'s>,
}

impl<'s, E: Engine + 's> Snapshot<'s, E> {
    /// Look up the IDs in the unbound position of a pattern.
    ///
    /// With all three positions bound, returns the object of each match
    /// (so a non-empty result means the triple exists). Results of every
    /// combination of candidate IDs are concatenated without deduplication.
    ///
    /// # Errors
    ///
    /// `UnderconstrainedPattern` when fewer than two positions are bound.
    /// A value that was never stored is not an error; it matches nothing.
    pub fn get(
        &self,
        subject: impl Into<Pattern>,
        predicate: impl Into<Pattern>,
        object: impl Into<Pattern>,
    ) -> Result<Vec<SurrogateId>, Error> {
        self.matches(&subject.into(), &predicate.into(), &object.into())?
            .collect()
    }

    /// Lazy form of [`Self::get`].
    pub fn matches(
        &self,
        subject: &Pattern,
        predicate: &Pattern,
        object: &Pattern,
    ) -> Result<Matches<'_, E::Read<'s>>, Error> {
        query::matches(&self.txn, subject, predicate, object)
    }

    /// Scan whole triples matching any pattern, in index order.
    pub fn triples(
        &self,
        subject: impl Into<Pattern>,
        predicate: impl Into<Pattern>,
        object: impl Into<Pattern>,
    ) -> Result<Vec<Triple>, Error> {
        self.triple_matches(&subject.into(), &predicate.into(), &object.into())?
            .collect()
    }

    /// Lazy form of [`Self::triples`].
    pub fn triple_matches(
        &self,
        subject: &Pattern,
        predicate: &Pattern,
        object: &Pattern,
    ) -> Result<TripleMatches<'_, E::Read<'s>>, Error> {
        query::triples(&self.txn, subject, predicate, object)
    }

    /// The ID of a value, if it has been stored. Never creates one.
    pub fn lookup(&self, value: &Value) -> Result<Option<SurrogateId>, Error> {
        dictionary::lookup(&self.txn, value)
    }

    /// Turn IDs back into values, in order. Any failure fails the batch.
    pub fn materialize(&self, ids: &[SurrogateId]) -> Result<Vec<Value>, Error> {
        dictionary::materialize(&self.txn, ids)
    }

    /// Turn IDs back into values, with one result per ID.
    pub fn materialize_each(&self, ids: &[SurrogateId]) -> Vec<Result<Value, Error>> {
        dictionary::materialize_each(&self.txn, ids)
    }
}
