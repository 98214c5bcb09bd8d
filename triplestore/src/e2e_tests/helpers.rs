//! Common helpers for end-to-end tests.

use crate::engine::Engine;
use crate::store::TripleStore;
use crate::types::{Pattern, SurrogateId, Value};

/// Store every `(subject, predicate, object)` as string values.
pub fn put_strings<E: Engine>(store: &TripleStore<E>, triples: &[(&str, &str, &str)]) {
    for (s, p, o) in triples {
        store.put(*s, *p, *o).expect("put should succeed");
    }
}

/// The ID of a stored value.
pub fn id_of<E: Engine>(store: &TripleStore<E>, value: impl Into<Value>) -> SurrogateId {
    store
        .lookup(&value.into())
        .expect("lookup should succeed")
        .expect("value should be stored")
}

/// Run a lookup and materialize the results, sorted by display form.
pub fn get_values<E: Engine>(
    store: &TripleStore<E>,
    subject: impl Into<Pattern>,
    predicate: impl Into<Pattern>,
    object: impl Into<Pattern>,
) -> Vec<Value> {
    let ids = store
        .get(subject, predicate, object)
        .expect("get should succeed");
    let mut values = store.materialize(&ids).expect("materialize should succeed");
    values.sort_by_key(ToString::to_string);
    values
}

/// String values, in the order `get_values` returns them.
pub fn strings(items: &[&str]) -> Vec<Value> {
    let mut values: Vec<Value> = items.iter().map(|s| Value::string(*s)).collect();
    values.sort_by_key(ToString::to_string);
    values
}
