//! Choosing an index and prefix for a combination of bound positions.

use crate::storage::IndexOrder;
use crate::storage::keys::index_prefix;
use crate::types::{Position, SurrogateId, Triple};

/// A single prefix scan over one ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexScan {
    pub order: IndexOrder,
    pub prefix: Vec<u8>,
    /// Rows must also carry this ID at this position.
    pub filter: Option<(Position, SurrogateId)>,
}

impl IndexScan {
    fn new(order: IndexOrder, leading: &[SurrogateId]) -> Self {
        Self {
            order,
            prefix: index_prefix(order, leading),
            filter: None,
        }
    }

    /// Check a decoded row against the post-filter.
    #[must_use]
    pub fn accepts(&self, triple: &Triple) -> bool {
        self.filter
            .is_none_or(|(position, id)| triple.get(position) == id)
    }
}

/// Plan a lookup returning the one unbound field (or the object when all
/// three are bound).
///
/// Returns `None` when fewer than two positions are bound.
#[must_use]
pub fn plan_lookup(
    subject: Option<SurrogateId>,
    predicate: Option<SurrogateId>,
    object: Option<SurrogateId>,
) -> Option<IndexScan> {
    match (subject, predicate, object) {
        (Some(s), Some(p), Some(o)) => Some(IndexScan::new(IndexOrder::Spo, &[s, p, o])),
        (Some(s), Some(p), None) => Some(IndexScan::new(IndexOrder::Spo, &[s, p])),
        (None, Some(p), Some(o)) => Some(IndexScan::new(IndexOrder::Pos, &[p, o])),
        (Some(s), None, Some(o)) => Some(IndexScan::new(IndexOrder::Sop, &[s, o])),
        _ => None,
    }
}

/// Plan a scan returning whole triples. Any combination is accepted.
#[must_use]
pub fn plan_triples(
    subject: Option<SurrogateId>,
    predicate: Option<SurrogateId>,
    object: Option<SurrogateId>,
) -> IndexScan {
    if let Some(scan) = plan_lookup(subject, predicate, object) {
        return scan;
    }
    match (subject, predicate, object) {
        (Some(s), None, None) => IndexScan::new(IndexOrder::Spo, &[s]),
        (None, Some(p), None) => IndexScan::new(IndexOrder::Pos, &[p]),
        // No ordering leads with the object.
        (None, None, Some(o)) => IndexScan {
            filter: Some((Position::Object, o)),
            ..IndexScan::new(IndexOrder::Pos, &[])
        },
        _ => IndexScan::new(IndexOrder::Spo, &[]),
    }
}
