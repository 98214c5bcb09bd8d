//! Query evaluation over the triple indexes.
//!
//! A lookup binds at least two positions and returns the IDs in the
//! remaining one:
//!
//! ```ignore
//! let txn = engine.begin_read()?;
//! for id in matches(&txn, &"alice".into(), &"knows".into(), &Pattern::Wildcard)? {
//!     println!("{}", id?);
//! }
//! ```
//!
//! A triple scan accepts any pattern and returns whole triples.

mod evaluator;
mod plan;

pub use evaluator::{Matches, TripleMatches, matches, triples};
pub use plan::{IndexScan, plan_lookup, plan_triples};
