//! Test that lookups binding fewer than two positions are rejected.

use crate::error::Error;
use crate::testing::new_test_store;
use crate::types::Pattern;

#[test]
fn test_single_bound_lookup_rejected() {
    let store = new_test_store();
    store.put("alice", "knows", "bob").expect("put");

    let result = store.get("alice", Pattern::Wildcard, Pattern::Wildcard);
    assert!(matches!(
        result,
        Err(Error::UnderconstrainedPattern { bound: 1 })
    ));
}

#[test]
fn test_unbound_lookup_rejected() {
    let store = new_test_store();
    let result = store.get(Pattern::Wildcard, Pattern::Wildcard, Pattern::Wildcard);
    assert!(matches!(
        result,
        Err(Error::UnderconstrainedPattern { bound: 0 })
    ));
}

#[test]
fn test_unresolved_value_still_counts_as_bound() {
    let store = new_test_store();
    // "ghost" was never stored, but it binds the position.
    let found = store
        .get("ghost", "knows", Pattern::Wildcard)
        .expect("two bound positions");
    assert!(found.is_empty());
}
