//! Pattern evaluation.
//!
//! Each position of a pattern expands to a candidate set:
//! - `Value`: its ID, or nothing if the value was never stored
//! - `Ids`: the listed IDs
//! - `Wildcard`: a single unbound placeholder
//!
//! The cross product of the three sets gives one prefix scan per
//! combination. Scans run lazily as the caller pulls results, and results
//! of all combinations are concatenated in order without deduplication.

use std::vec;

use crate::engine::ReadTxn;
use crate::error::Error;
use crate::query::plan::{IndexScan, plan_lookup, plan_triples};
use crate::storage::IndexOrder;
use crate::storage::dictionary;
use crate::storage::keys::decode_index_key;
use crate::types::{Pattern, SurrogateId, Triple};

type Candidates = Vec<Option<SurrogateId>>;

fn candidates<T: ReadTxn + ?Sized>(txn: &T, pattern: &Pattern) -> Result<Candidates, Error> {
    Ok(match pattern {
        Pattern::Value(value) => dictionary::lookup(txn, value)?.into_iter().map(Some).collect(),
        Pattern::Ids(ids) => ids.iter().copied().map(Some).collect(),
        Pattern::Wildcard => vec![None],
    })
}

fn combinations<'a>(
    subjects: &'a Candidates,
    predicates: &'a Candidates,
    objects: &'a Candidates,
) -> impl Iterator<Item = [Option<SurrogateId>; 3]> + 'a {
    subjects.iter().flat_map(move |&s| {
        predicates
            .iter()
            .flat_map(move |&p| objects.iter().map(move |&o| [s, p, o]))
    })
}

fn plan_all<T, F>(txn: &T, patterns: [&Pattern; 3], plan: F) -> Result<Vec<IndexScan>, Error>
where
    T: ReadTxn + ?Sized,
    F: Fn([Option<SurrogateId>; 3]) -> Option<IndexScan>,
{
    let [s, p, o] = patterns;
    let subjects = candidates(txn, s)?;
    let predicates = candidates(txn, p)?;
    let objects = candidates(txn, o)?;
    Ok(combinations(&subjects, &predicates, &objects)
        .filter_map(plan)
        .collect())
}

/// Evaluate a lookup pattern, yielding the IDs in the unbound position.
///
/// When all three positions are bound, yields the object of each match.
///
/// # Errors
///
/// Fails with `UnderconstrainedPattern` before touching the index when
/// fewer than two positions are bound.
pub fn matches<'t, T: ReadTxn + ?Sized>(
    txn: &'t T,
    subject: &Pattern,
    predicate: &Pattern,
    object: &Pattern,
) -> Result<Matches<'t, T>, Error> {
    let bound = [subject, predicate, object]
        .iter()
        .filter(|pattern| pattern.is_bound())
        .count();
    if bound < 2 {
        return Err(Error::UnderconstrainedPattern { bound });
    }

    let scans = plan_all(txn, [subject, predicate, object], |[s, p, o]| {
        plan_lookup(s, p, o)
    })?;
    tracing::debug!("lookup expands to {} scans", scans.len());
    Ok(Matches {
        rows: Rows::new(txn, scans),
    })
}

/// Evaluate a pattern with any number of bound positions, yielding whole
/// triples.
pub fn triples<'t, T: ReadTxn + ?Sized>(
    txn: &'t T,
    subject: &Pattern,
    predicate: &Pattern,
    object: &Pattern,
) -> Result<TripleMatches<'t, T>, Error> {
    let scans = plan_all(txn, [subject, predicate, object], |[s, p, o]| {
        Some(plan_triples(s, p, o))
    })?;
    tracing::debug!("triple scan expands to {} scans", scans.len());
    Ok(TripleMatches {
        rows: Rows::new(txn, scans),
    })
}

/// Index rows of a sequence of scans, decoded into triples.
struct Rows<'t, T: ?Sized> {
    txn: &'t T,
    scans: vec::IntoIter<IndexScan>,
    current: Option<IndexScan>,
    keys: vec::IntoIter<Vec<u8>>,
}

impl<'t, T: ReadTxn + ?Sized> Rows<'t, T> {
    fn new(txn: &'t T, scans: Vec<IndexScan>) -> Self {
        Self {
            txn,
            scans: scans.into_iter(),
            current: None,
            keys: Vec::new().into_iter(),
        }
    }

    /// Next row that passes its scan's filter, with the ordering it came from.
    fn next_row(&mut self) -> Option<Result<(IndexOrder, Triple), Error>> {
        loop {
            if let Some(scan) = &self.current {
                for key in self.keys.by_ref() {
                    let Some(triple) = decode_index_key(scan.order, &key) else {
                        return Some(Err(Error::CorruptRecord(format!(
                            "malformed {} index key of {} bytes",
                            scan.order,
                            key.len()
                        ))));
                    };
                    if scan.accepts(&triple) {
                        return Some(Ok((scan.order, triple)));
                    }
                }
            }

            let scan = self.scans.next()?;
            tracing::debug!(
                "scanning {} with prefix {}",
                scan.order,
                hex::encode(&scan.prefix)
            );
            match self.txn.scan_prefix(&scan.prefix) {
                Ok(keys) => {
                    self.keys = keys.into_iter();
                    self.current = Some(scan);
                }
                Err(e) => {
                    self.scans = Vec::new().into_iter();
                    self.current = None;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

/// Lazy lookup results. Forward only; an engine error ends the iteration.
pub struct Matches<'t, T: ?Sized> {
    rows: Rows<'t, T>,
}

impl<T: ReadTxn + ?Sized> Iterator for Matches<'_, T> {
    type Item = Result<SurrogateId, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows
            .next_row()
            .map(|row| row.map(|(order, triple)| triple.get(order.positions()[2])))
    }
}

/// Lazy full-triple results. Forward only; an engine error ends the
/// iteration.
pub struct TripleMatches<'t, T: ?Sized> {
    rows: Rows<'t, T>,
}

impl<T: ReadTxn + ?Sized> Iterator for TripleMatches<'_, T> {
    type Item = Result<Triple, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows
            .next_row()
            .map(|row| row.map(|(_, triple)| triple))
    }
}
