//! Physical key layout.
//!
//! # Triple index rows
//!
//! Each triple is written under three orderings. Keys are 28 bytes:
//! `(prefix: u8, first: [u8; 9], second: [u8; 9], third: [u8; 9])`
//!
//! | Order | Prefix | Fields              |
//! |-------|--------|---------------------|
//! | SPO   | `0x01` | subject, predicate, object |
//! | POS   | `0x02` | predicate, object, subject |
//! | SOP   | `0x03` | subject, object, predicate |
//!
//! Any two bound positions form a leading prefix of exactly one ordering,
//! so every two-bound pattern is a single prefix scan. Rows carry no value.
//!
//! # Dictionary rows
//!
//! - Forward: the 9-byte surrogate ID -> value record.
//! - Reverse, small record: the record itself -> surrogate ID.
//! - Reverse, large record: `[0x05][sha256(record)]` -> surrogate ID.

use sha2::{Digest, Sha256};

use crate::constants::{
    DIGEST_LEN, INDEX_KEY_LEN, INLINE_THRESHOLD, PREFIX_POS, PREFIX_SEQUENCE, PREFIX_SOP,
    PREFIX_SPO, RECORD_DIGEST, RECORD_VALUE, SURROGATE_ID_LEN,
};
use crate::types::{Position, SurrogateId, Triple, Value, ValueError};

/// One of the three physical orderings of a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexOrder {
    Spo,
    Pos,
    Sop,
}

impl IndexOrder {
    /// All orderings, in the order rows are written.
    pub const ALL: [Self; 3] = [Self::Spo, Self::Sop, Self::Pos];

    /// Leading key byte.
    #[must_use]
    pub const fn prefix(self) -> u8 {
        match self {
            Self::Spo => PREFIX_SPO,
            Self::Pos => PREFIX_POS,
            Self::Sop => PREFIX_SOP,
        }
    }

    /// Positions in key order.
    #[must_use]
    pub const fn positions(self) -> [Position; 3] {
        match self {
            Self::Spo => [Position::Subject, Position::Predicate, Position::Object],
            Self::Pos => [Position::Predicate, Position::Object, Position::Subject],
            Self::Sop => [Position::Subject, Position::Object, Position::Predicate],
        }
    }
}

impl std::fmt::Display for IndexOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spo => write!(f, "SPO"),
            Self::Pos => write!(f, "POS"),
            Self::Sop => write!(f, "SOP"),
        }
    }
}

/// Create the index key for a triple under an ordering.
#[must_use]
pub fn index_key(order: IndexOrder, triple: &Triple) -> [u8; INDEX_KEY_LEN] {
    let mut key = [0u8; INDEX_KEY_LEN];
    key[0] = order.prefix();
    for (i, position) in order.positions().into_iter().enumerate() {
        let start = 1 + i * SURROGATE_ID_LEN;
        key[start..start + SURROGATE_ID_LEN].copy_from_slice(triple.get(position).as_bytes());
    }
    key
}

/// Create a scan prefix: the ordering byte followed by the leading IDs.
#[must_use]
pub fn index_prefix(order: IndexOrder, leading: &[SurrogateId]) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(1 + leading.len() * SURROGATE_ID_LEN);
    prefix.push(order.prefix());
    for id in leading {
        prefix.extend_from_slice(id.as_bytes());
    }
    prefix
}

/// Split an index key back into a triple.
///
/// Returns `None` if the key is not a well-formed row of this ordering.
#[must_use]
pub fn decode_index_key(order: IndexOrder, key: &[u8]) -> Option<Triple> {
    if key.len() != INDEX_KEY_LEN || key[0] != order.prefix() {
        return None;
    }
    let field = |i: usize| {
        let start = 1 + i * SURROGATE_ID_LEN;
        SurrogateId::from_slice(&key[start..start + SURROGATE_ID_LEN])
    };
    Some(Triple::from_ordered(
        order.positions(),
        [field(0)?, field(1)?, field(2)?],
    ))
}

/// The last field of an index key.
#[must_use]
pub fn trailing_id(key: &[u8]) -> Option<SurrogateId> {
    let start = key.len().checked_sub(SURROGATE_ID_LEN)?;
    SurrogateId::from_slice(&key[start..])
}

/// Encode a value as a dictionary record: `[0x04]` followed by the value.
pub fn value_record(value: &Value) -> Result<Vec<u8>, ValueError> {
    let mut record = Vec::with_capacity(1 + value.encoded_size());
    record.push(RECORD_VALUE);
    value.encode_into(&mut record)?;
    Ok(record)
}

/// Whether a record is small enough to be its own reverse lookup key.
#[must_use]
pub const fn is_inline(record: &[u8]) -> bool {
    record.len() <= INLINE_THRESHOLD
}

/// Reverse lookup key for a large record: `[0x05][sha256(record)]`.
#[must_use]
pub fn digest_key(record: &[u8]) -> [u8; 1 + DIGEST_LEN] {
    let mut key = [0u8; 1 + DIGEST_LEN];
    key[0] = RECORD_DIGEST;
    key[1..].copy_from_slice(&Sha256::digest(record));
    key
}

/// Reverse lookup key for any record.
#[must_use]
pub fn reverse_key(record: &[u8]) -> Vec<u8> {
    if is_inline(record) {
        record.to_vec()
    } else {
        digest_key(record).to_vec()
    }
}

/// Key of a named sequence lease.
#[must_use]
pub fn sequence_key(name: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + name.len());
    key.push(PREFIX_SEQUENCE);
    key.extend_from_slice(name.as_bytes());
    key
}
