//! Triples of surrogate IDs.

use std::fmt;

use serde::Serialize;

use crate::types::SurrogateId;

/// A position within a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Subject,
    Predicate,
    Object,
}

impl Position {
    /// All positions in subject, predicate, object order.
    pub const ALL: [Self; 3] = [Self::Subject, Self::Predicate, Self::Object];
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subject => write!(f, "subject"),
            Self::Predicate => write!(f, "predicate"),
            Self::Object => write!(f, "object"),
        }
    }
}

/// A stored fact.
///
/// Triples are immutable once written; there is no update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Triple {
    pub subject: SurrogateId,
    pub predicate: SurrogateId,
    pub object: SurrogateId,
}

impl Triple {
    /// Create a new triple.
    #[must_use]
    pub const fn new(subject: SurrogateId, predicate: SurrogateId, object: SurrogateId) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Get the ID at a position.
    #[must_use]
    pub const fn get(&self, position: Position) -> SurrogateId {
        match position {
            Position::Subject => self.subject,
            Position::Predicate => self.predicate,
            Position::Object => self.object,
        }
    }

    /// Build a triple from IDs listed in the given position order.
    #[must_use]
    pub const fn from_ordered(order: [Position; 3], ids: [SurrogateId; 3]) -> Self {
        let mut triple = Self::new(ids[0], ids[0], ids[0]);
        let mut i = 0;
        while i < 3 {
            match order[i] {
                Position::Subject => triple.subject = ids[i],
                Position::Predicate => triple.predicate = ids[i],
                Position::Object => triple.object = ids[i],
            }
            i += 1;
        }
        triple
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.subject, self.predicate, self.object)
    }
}
