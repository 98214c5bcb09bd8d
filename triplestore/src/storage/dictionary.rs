//! Value dictionary: interning values into surrogate IDs and back.
//!
//! # Records
//!
//! A value's record is `[0x04]` followed by its canonical encoding. Records
//! of at most `INLINE_THRESHOLD` bytes get a direct ID and are reverse
//! indexed by the record bytes themselves. Larger records get a hashed ID
//! and are reverse indexed by their SHA-256 digest, which bounds the key
//! size. Two large values are treated as equal exactly when their digests
//! are equal.
//!
//! # Forward records
//!
//! The forward row of an ID normally holds the value record. A forward row
//! beginning with `0x05` is an indirection: its bytes are a digest key,
//! which is followed once (digest key -> ID -> record). The write path never
//! produces indirections, but they are accepted on read.

use crate::constants::{RECORD_DIGEST, RECORD_VALUE};
use crate::engine::{ReadTxn, WriteTxn};
use crate::error::Error;
use crate::storage::allocator::Allocation;
use crate::storage::keys::{is_inline, reverse_key, value_record};
use crate::types::{IdTag, SurrogateId, Value};

/// Look up the ID of a value without creating it.
pub fn lookup<T: ReadTxn + ?Sized>(txn: &T, value: &Value) -> Result<Option<SurrogateId>, Error> {
    let record = value_record(value)?;
    lookup_record(txn, &record)
}

fn lookup_record<T: ReadTxn + ?Sized>(
    txn: &T,
    record: &[u8],
) -> Result<Option<SurrogateId>, Error> {
    let Some(raw) = txn.get(&reverse_key(record))? else {
        return Ok(None);
    };
    let id = SurrogateId::from_slice(&raw).ok_or_else(|| {
        Error::CorruptRecord(format!(
            "reverse entry holds {} bytes that are not a surrogate ID",
            raw.len()
        ))
    })?;
    Ok(Some(id))
}

/// Resolve a value to its ID.
///
/// If the value is absent and `create` is false, fails with `NotFound`.
/// If it is absent and `create` is true, allocates an ID from `allocation`
/// and writes the forward and reverse rows into `txn`.
pub fn resolve<T: WriteTxn>(
    txn: &mut T,
    allocation: &mut dyn Allocation,
    value: &Value,
    create: bool,
) -> Result<SurrogateId, Error> {
    let record = value_record(value)?;
    if let Some(id) = lookup_record(&*txn, &record)? {
        return Ok(id);
    }
    if !create {
        return Err(Error::NotFound(format!("value {value}")));
    }

    let tag = if is_inline(&record) {
        IdTag::Direct
    } else {
        IdTag::Hashed
    };
    let sequence = allocation.allocate(txn)?;
    let id = SurrogateId::from_sequence(tag, sequence).ok_or(Error::IdSpaceExhausted)?;

    txn.set(id.as_bytes(), &record)?;
    txn.set(&reverse_key(&record), id.as_bytes())?;

    tracing::debug!("interned {value} as {id}");
    Ok(id)
}

/// Turn one ID back into its value.
pub fn materialize_one<T: ReadTxn + ?Sized>(txn: &T, id: SurrogateId) -> Result<Value, Error> {
    let record = txn
        .get(id.as_bytes())?
        .ok_or_else(|| Error::NotFound(format!("surrogate ID {id}")))?;

    match record.first() {
        Some(&RECORD_VALUE) => decode_record(id, &record),
        Some(&RECORD_DIGEST) => follow_indirection(txn, id, &record),
        Some(&tag) => Err(Error::CorruptRecord(format!(
            "forward record of {id} has unknown tag {tag:#04x}"
        ))),
        None => Err(Error::CorruptRecord(format!(
            "forward record of {id} is empty"
        ))),
    }
}

/// Turn IDs back into values. The first failure fails the whole batch.
pub fn materialize<T: ReadTxn + ?Sized>(txn: &T, ids: &[SurrogateId]) -> Result<Vec<Value>, Error> {
    ids.iter().map(|id| materialize_one(txn, *id)).collect()
}

/// Turn IDs back into values, failing per element.
pub fn materialize_each<T: ReadTxn + ?Sized>(
    txn: &T,
    ids: &[SurrogateId],
) -> Vec<Result<Value, Error>> {
    ids.iter().map(|id| materialize_one(txn, *id)).collect()
}

fn follow_indirection<T: ReadTxn + ?Sized>(
    txn: &T,
    id: SurrogateId,
    pointer: &[u8],
) -> Result<Value, Error> {
    let target = txn.get(pointer)?.ok_or_else(|| {
        Error::CorruptRecord(format!("indirection from {id} points at a missing entry"))
    })?;
    let target = SurrogateId::from_slice(&target).ok_or_else(|| {
        Error::CorruptRecord(format!("indirection from {id} does not lead to an ID"))
    })?;
    if target == id {
        return Err(Error::CorruptRecord(format!("indirection from {id} points at itself")));
    }

    let record = txn.get(target.as_bytes())?.ok_or_else(|| {
        Error::CorruptRecord(format!("indirection from {id} leads to missing {target}"))
    })?;
    if record.first() != Some(&RECORD_VALUE) {
        return Err(Error::CorruptRecord(format!(
            "indirection from {id} leads to {target}, which is not a value record"
        )));
    }
    tracing::debug!("followed indirection {id} -> {target}");
    decode_record(target, &record)
}

fn decode_record(id: SurrogateId, record: &[u8]) -> Result<Value, Error> {
    Value::from_bytes_exact(&record[1..])
        .map_err(|e| Error::CorruptRecord(format!("forward record of {id}: {e}")))
}
