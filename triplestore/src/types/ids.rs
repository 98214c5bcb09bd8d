//! Surrogate identifiers.
//!
//! A surrogate ID is the fixed-width token stored in triple index rows in
//! place of a value. It doubles as the key of the value's forward record.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::constants::{HASHED_ID_OFFSET, PREFIX_DIRECT_ID, PREFIX_HASHED_ID, SURROGATE_ID_LEN};

/// How a value was interned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IdTag {
    /// Small value, reverse-indexed by its full encoding.
    Direct = PREFIX_DIRECT_ID,
    /// Large value, reverse-indexed by its digest.
    Hashed = PREFIX_HASHED_ID,
}

impl TryFrom<u8> for IdTag {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            PREFIX_DIRECT_ID => Ok(Self::Direct),
            PREFIX_HASHED_ID => Ok(Self::Hashed),
            _ => Err(value),
        }
    }
}

/// A 9-byte surrogate identifier: one tag byte and a little-endian counter.
///
/// # Invariants
///
/// - The first byte is always a valid `IdTag`.
/// - Direct counters are below `HASHED_ID_OFFSET`; hashed counters are at or
///   above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurrogateId([u8; SURROGATE_ID_LEN]);

impl SurrogateId {
    /// Build an ID from a tag and its final counter value.
    #[must_use]
    pub fn new(tag: IdTag, counter: u64) -> Self {
        let mut bytes = [0u8; SURROGATE_ID_LEN];
        bytes[0] = tag as u8;
        bytes[1..].copy_from_slice(&counter.to_le_bytes());
        Self(bytes)
    }

    /// Build an ID from a raw sequence number.
    ///
    /// Hashed IDs are shifted into the upper range by `HASHED_ID_OFFSET`.
    /// Returns `None` if the sequence number is outside the shared range.
    #[must_use]
    pub fn from_sequence(tag: IdTag, sequence: u64) -> Option<Self> {
        if sequence >= HASHED_ID_OFFSET {
            return None;
        }
        let counter = match tag {
            IdTag::Direct => sequence,
            IdTag::Hashed => sequence + HASHED_ID_OFFSET,
        };
        Some(Self::new(tag, counter))
    }

    /// Parse an ID from exactly nine bytes.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; SURROGATE_ID_LEN] = bytes.try_into().ok()?;
        IdTag::try_from(bytes[0]).ok()?;
        Some(Self(bytes))
    }

    /// The tag byte.
    #[must_use]
    pub fn tag(&self) -> IdTag {
        if self.0[0] == PREFIX_HASHED_ID {
            IdTag::Hashed
        } else {
            IdTag::Direct
        }
    }

    /// The counter, including the hashed offset for hashed IDs.
    #[must_use]
    pub fn counter(&self) -> u64 {
        let mut counter = [0u8; 8];
        counter.copy_from_slice(&self.0[1..]);
        u64::from_le_bytes(counter)
    }

    /// Get the underlying byte array.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SURROGATE_ID_LEN] {
        &self.0
    }
}

impl fmt::Display for SurrogateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode(self.0))
    }
}

/// Error returned when parsing a surrogate ID from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError(pub String);

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid surrogate ID: {}", self.0)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for SurrogateId {
    type Err = ParseIdError;

    /// Parse the `#<18 hex digits>` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| ParseIdError(format!("{s}: {e}")))?;
        Self::from_slice(&bytes).ok_or_else(|| ParseIdError(s.to_owned()))
    }
}

impl Serialize for SurrogateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<SurrogateId> for [u8; SURROGATE_ID_LEN] {
    fn from(id: SurrogateId) -> Self {
        id.0
    }
}
