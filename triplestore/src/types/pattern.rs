//! Query patterns.
//!
//! A pattern says what a single triple position may match: one concrete
//! value, any of a list of already-resolved IDs, or anything.

use crate::types::{SurrogateId, Value};

/// What one triple position of a query may match.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// A concrete value, resolved through the dictionary without creating it.
    Value(Value),
    /// Any of these IDs (logical OR). An empty list matches nothing.
    Ids(Vec<SurrogateId>),
    /// Unbound.
    Wildcard,
}

impl Pattern {
    /// Whether this position is fixed.
    ///
    /// A value that resolves to nothing is still bound: it matches nothing
    /// rather than everything.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        !matches!(self, Self::Wildcard)
    }
}

impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Self::Value(Value::from(s))
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Self::Value(Value::String(s))
    }
}

impl From<i64> for Pattern {
    fn from(n: i64) -> Self {
        Self::Value(Value::Integer(n))
    }
}

impl From<bool> for Pattern {
    fn from(b: bool) -> Self {
        Self::Value(Value::Boolean(b))
    }
}

impl From<SurrogateId> for Pattern {
    fn from(id: SurrogateId) -> Self {
        Self::Ids(vec![id])
    }
}

impl From<Vec<SurrogateId>> for Pattern {
    fn from(ids: Vec<SurrogateId>) -> Self {
        Self::Ids(ids)
    }
}

impl From<&[SurrogateId]> for Pattern {
    fn from(ids: &[SurrogateId]) -> Self {
        Self::Ids(ids.to_vec())
    }
}

impl<T: Into<Self>> From<Option<T>> for Pattern {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Wildcard, Into::into)
    }
}
