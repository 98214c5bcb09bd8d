//! Storage layer over an ordered key-value engine.
//!
//! Everything lives in one flat key space, partitioned by the leading byte:
//!
//! | Byte   | Contents                                  |
//! |--------|-------------------------------------------|
//! | `0x00` | forward record of a direct ID             |
//! | `0x01` | SPO index row                             |
//! | `0x02` | POS index row                             |
//! | `0x03` | SOP index row                             |
//! | `0x04` | reverse entry of a small value record     |
//! | `0x05` | reverse entry of a large value (digest)   |
//! | `0x06` | forward record of a hashed ID             |
//! | `0x07` | sequence lease                            |

mod allocator;
pub mod dictionary;
mod index;
pub mod keys;

pub use allocator::{Allocation, IdAllocator, SequenceAllocator};
pub use index::TripleIndex;
pub use keys::IndexOrder;
