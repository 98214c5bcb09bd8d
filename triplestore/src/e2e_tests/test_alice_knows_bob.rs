//! Test the basic put, get, materialize cycle.

use crate::e2e_tests::helpers::{get_values, strings};
use crate::testing::new_test_store;
use crate::types::{Pattern, Value};

#[test]
fn test_alice_knows_bob() {
    let store = new_test_store();
    store.put("alice", "knows", "bob").expect("put");

    let ids = store
        .get("alice", "knows", Pattern::Wildcard)
        .expect("get");
    assert_eq!(ids.len(), 1);
    assert_eq!(
        store.materialize(&ids).expect("materialize"),
        vec![Value::string("bob")]
    );
}

#[test]
fn test_alice_knows_several() {
    let store = new_test_store();
    store.put("alice", "knows", "bob").expect("put");
    store.put("alice", "knows", "carol").expect("put");
    store.put("alice", "likes", "dave").expect("put");

    assert_eq!(
        get_values(&store, "alice", "knows", Pattern::Wildcard),
        strings(&["bob", "carol"])
    );
    assert_eq!(
        get_values(&store, "alice", "likes", Pattern::Wildcard),
        strings(&["dave"])
    );
}
