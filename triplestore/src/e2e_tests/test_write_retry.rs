//! Test bounded retry of conflicting writes.

use crate::engine::FaultConfig;
use crate::error::Error;
use crate::testing::new_faulty_store;
use crate::types::Pattern;

#[test]
fn test_conflicts_within_bound_succeed() {
    let store = new_faulty_store(0, FaultConfig::conflict_first_commits(3));
    store.put("alice", "knows", "bob").expect("fourth attempt commits");

    let stats = store.engine().stats().expect("stats");
    assert_eq!(stats.injected_conflicts, 3);
    assert_eq!(stats.commits, 4);
    assert_eq!(
        store.get("alice", "knows", Pattern::Wildcard).expect("get").len(),
        1
    );
}

#[test]
fn test_conflicts_beyond_bound_surface() {
    let store = new_faulty_store(0, FaultConfig::conflict_first_commits(4));
    let result = store.put("alice", "knows", "bob");
    assert!(matches!(result, Err(Error::WriteConflict)));
    assert!(store.engine().is_empty().expect("len"));

    // The next put gets through.
    store.put("alice", "knows", "bob").expect("conflicts exhausted");
}

#[test]
fn test_random_conflicts_never_lose_writes() {
    let faults = FaultConfig {
        commit_conflict_rate: 0.3,
        ..FaultConfig::default()
    };
    let store = new_faulty_store(42, faults);

    let mut stored = 0;
    for i in 0..50i64 {
        match store.put("counter", "value", i) {
            Ok(_) => stored += 1,
            Err(Error::WriteConflict) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    let found = store.get("counter", "value", Pattern::Wildcard).expect("get");
    assert_eq!(found.len(), stored);
    assert!(stored > 0);
}
