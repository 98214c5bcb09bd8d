#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]
// A triple store indexing layer over an ordered key-value engine.
//
// Life of a write:
// 1. Each value is encoded and looked up in the dictionary
// 2. Unknown values get a surrogate ID from the batched sequence
// 3. The triple of IDs is written under the SPO, POS, and SOP orderings
// 4. The engine transaction commits (or the whole write is discarded)
//
// Life of a read:
// 1. Bound values are resolved to IDs without creating them
// 2. Each combination of candidate IDs picks one ordering and prefix
// 3. Prefix scans yield the IDs of the unbound position
// 4. IDs are materialized back into values on request

pub mod config;
mod constants;
pub mod engine;
pub mod error;
pub mod query;
pub mod retry;
pub mod storage;
pub mod store;
pub mod types;

#[cfg(test)]
mod e2e_tests;
#[cfg(test)]
mod testing;

pub use config::{ConfigError, StoreConfig};
pub use error::Error;
pub use retry::RetryPolicy;
pub use store::{Snapshot, TripleStore};
pub use types::{Pattern, Position, SurrogateId, Triple, Value};
