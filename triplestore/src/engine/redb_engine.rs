//! Persistent engine backed by redb.
//!
//! All subsystems share one redb table of byte-string keys to byte-string
//! values. redb provides serializable write transactions (one writer at a
//! time), MVCC snapshots for readers, and crash-safe commits.

use std::path::{Path, PathBuf};

use redb::{Database, ReadTransaction, ReadableTable, TableDefinition, WriteTransaction};

use super::{Engine, EngineError, ReadTxn, WriteTxn};

/// The shared ordered key space.
const KEYSPACE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("KEYSPACE");

/// A redb database file.
pub struct RedbEngine {
    db: Database,
    path: PathBuf,
}

impl RedbEngine {
    /// Open the database file at `path`, creating it if it does not exist.
    ///
    /// The parent directory must exist.
    pub fn open(path: &Path) -> Result<Self, EngineError> {
        let db = Database::create(path).map_err(|e| EngineError::Redb(e.into()))?;

        // Make sure the table exists so read transactions can open it.
        let w = db.begin_write().map_err(|e| EngineError::Redb(e.into()))?;
        w.open_table(KEYSPACE)
            .map_err(|e| EngineError::Redb(e.into()))?;
        w.commit().map_err(|e| EngineError::Redb(e.into()))?;

        tracing::debug!("opened redb engine at {}", path.display());
        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    /// Path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Engine for RedbEngine {
    type Read<'e> = RedbReadTxn<'e>;
    type Write<'e> = RedbWriteTxn<'e>;

    fn begin_read(&self) -> Result<Self::Read<'_>, EngineError> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| EngineError::Redb(e.into()))?;
        Ok(RedbReadTxn { txn })
    }

    fn begin_write(&self) -> Result<Self::Write<'_>, EngineError> {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| EngineError::Redb(e.into()))?;
        Ok(RedbWriteTxn { txn })
    }
}

/// A redb read transaction.
pub struct RedbReadTxn<'e> {
    txn: ReadTransaction<'e>,
}

impl ReadTxn for RedbReadTxn<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError> {
        let table = self
            .txn
            .open_table(KEYSPACE)
            .map_err(|e| EngineError::Redb(e.into()))?;
        get_from(&table, key)
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>, EngineError> {
        let table = self
            .txn
            .open_table(KEYSPACE)
            .map_err(|e| EngineError::Redb(e.into()))?;
        scan_from(&table, prefix)
    }
}

/// A redb write transaction.
pub struct RedbWriteTxn<'e> {
    txn: WriteTransaction<'e>,
}

impl ReadTxn for RedbWriteTxn<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError> {
        let table = self
            .txn
            .open_table(KEYSPACE)
            .map_err(|e| EngineError::Redb(e.into()))?;
        get_from(&table, key)
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>, EngineError> {
        let table = self
            .txn
            .open_table(KEYSPACE)
            .map_err(|e| EngineError::Redb(e.into()))?;
        scan_from(&table, prefix)
    }
}

impl WriteTxn for RedbWriteTxn<'_> {
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), EngineError> {
        let mut table = self
            .txn
            .open_table(KEYSPACE)
            .map_err(|e| EngineError::Redb(e.into()))?;
        table
            .insert(key, value)
            .map_err(|e| EngineError::Redb(e.into()))?;
        Ok(())
    }

    fn commit(self) -> Result<(), EngineError> {
        self.txn.commit().map_err(|e| EngineError::Redb(e.into()))
    }

    fn abort(self) -> Result<(), EngineError> {
        self.txn.abort().map_err(|e| EngineError::Redb(e.into()))
    }
}

fn get_from<T>(table: &T, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let value = table
        .get(key)
        .map_err(|e| EngineError::Redb(e.into()))?
        .map(|guard| guard.value().to_vec());
    Ok(value)
}

fn scan_from<T>(table: &T, prefix: &[u8]) -> Result<Vec<Vec<u8>>, EngineError>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let mut keys = Vec::new();
    let range = table
        .range(prefix..)
        .map_err(|e| EngineError::Redb(e.into()))?;
    for entry in range {
        let (key, _) = entry.map_err(|e| EngineError::Redb(e.into()))?;
        let key = key.value();
        if !key.starts_with(prefix) {
            break;
        }
        keys.push(key.to_vec());
    }
    Ok(keys)
}
