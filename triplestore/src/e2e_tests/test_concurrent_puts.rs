//! Test concurrent writers sharing one store and one ID sequence.

use std::collections::HashSet;

use crate::engine::FaultConfig;
use crate::error::Error;
use crate::retry::RetryPolicy;
use crate::testing::new_faulty_store;
use crate::types::{Pattern, SurrogateId, Value};

const WRITERS: usize = 8;
const PUTS_PER_WRITER: usize = 100;

#[test]
fn test_concurrent_puts_keep_ids_unique() {
    let faults = FaultConfig {
        commit_conflict_rate: 0.5,
        ..FaultConfig::default()
    };
    let store = new_faulty_store(11, faults).with_retry_policy(RetryPolicy::NONE);

    let committed: Vec<(Value, SurrogateId)> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..WRITERS)
            .map(|writer| {
                let store = &store;
                s.spawn(move || {
                    let mut stored = Vec::new();
                    for i in 0..PUTS_PER_WRITER {
                        let object = Value::String(format!("{writer}-{i}"));
                        match store.put("writer", "wrote", object.clone()) {
                            Ok(triple) => stored.push((object, triple.object)),
                            Err(Error::WriteConflict) => {}
                            Err(e) => panic!("unexpected error: {e}"),
                        }
                    }
                    stored
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("writer thread"))
            .collect()
    });
    assert!(!committed.is_empty());
    assert!(store.engine().stats().expect("stats").injected_conflicts > 0);

    // Every committed ID still reads back as the value it was handed out for.
    let ids: Vec<SurrogateId> = committed.iter().map(|(_, id)| *id).collect();
    let values = store.materialize(&ids).expect("materialize");
    for ((expected, id), actual) in committed.iter().zip(&values) {
        assert_eq!(actual, expected, "{id} materialized to another value");
    }

    let distinct_ids: HashSet<SurrogateId> = ids.iter().copied().collect();
    assert_eq!(distinct_ids.len(), committed.len());

    let found = store
        .get("writer", "wrote", Pattern::Wildcard)
        .expect("get");
    assert_eq!(found.len(), committed.len());
}

#[test]
fn test_concurrent_puts_of_one_value_share_an_id() {
    let store = new_faulty_store(3, FaultConfig::default());

    let ids: HashSet<SurrogateId> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..WRITERS)
            .map(|_| s.spawn(|| store.put("alice", "knows", "bob").expect("put").object))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("writer thread"))
            .collect()
    });
    assert_eq!(ids.len(), 1);
    assert_eq!(
        store.get("alice", "knows", Pattern::Wildcard).expect("get").len(),
        1
    );
}
