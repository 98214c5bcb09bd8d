//! Binary layout constants shared by the dictionary, the triple indexes and
//! the sequence allocator.
//!
//! Every row lives in one ordered key space. The first byte of a key names
//! the subsystem that owns it, so these values must stay distinct and must
//! never change once data has been written.

/// Forward record of a directly interned value: `[0x00][counter; 8]` -> record.
pub const PREFIX_DIRECT_ID: u8 = 0x00;
/// Subject, predicate, object ordering.
pub const PREFIX_SPO: u8 = 0x01;
/// Predicate, object, subject ordering.
pub const PREFIX_POS: u8 = 0x02;
/// Subject, object, predicate ordering.
pub const PREFIX_SOP: u8 = 0x03;
/// Leading byte of every value record. Small records double as their own
/// reverse lookup key.
pub const RECORD_VALUE: u8 = 0x04;
/// Reverse lookup by digest: `[0x05][sha256; 32]` -> surrogate ID.
/// A forward record starting with this byte is an indirection.
pub const RECORD_DIGEST: u8 = 0x05;
/// Forward record of a hashed value: `[0x06][counter; 8]` -> record.
pub const PREFIX_HASHED_ID: u8 = 0x06;
/// Durable sequence leases: `[0x07][name]` -> next unleased counter.
pub const PREFIX_SEQUENCE: u8 = 0x07;

/// Records up to this many bytes (tag included) are interned directly.
/// Larger records are looked up by digest.
pub const INLINE_THRESHOLD: usize = 40;

/// Offset added to the sequence value for hashed IDs (2^63 - 1).
///
/// Both tags draw from one counter; the offset keeps the numeric ranges apart.
pub const HASHED_ID_OFFSET: u64 = 9_223_372_036_854_775_807;

/// Length of a surrogate ID: one tag byte and an 8-byte counter.
pub const SURROGATE_ID_LEN: usize = 9;

/// Length of a SHA-256 digest.
pub const DIGEST_LEN: usize = 32;

/// Length of a triple index row key: prefix plus three surrogate IDs.
pub const INDEX_KEY_LEN: usize = 1 + 3 * SURROGATE_ID_LEN;

/// Name of the sequence that feeds value IDs.
pub const VALUE_SEQUENCE: &str = "values";

/// Number of IDs reserved per lease of the value sequence.
pub const DEFAULT_SEQUENCE_BANDWIDTH: u64 = 10;

/// Maximum length of a string or byte payload inside a value.
pub const MAX_VALUE_PAYLOAD_LENGTH: usize = u32::MAX as usize;
