//! Core data types: values, surrogate IDs, triples and query patterns.

mod ids;
mod pattern;
mod triple;
mod value;

pub use ids::{IdTag, ParseIdError, SurrogateId};
pub use pattern::Pattern;
pub use triple::{Position, Triple};
pub use value::{Value, ValueError, ValueType};
