//! Test that storing a triple twice changes nothing.

use crate::testing::new_test_store;

#[test]
fn test_put_twice_matches_once() {
    let store = new_test_store();
    let first = store.put("A", "B", "C").expect("first put");
    let keys_after_first = store.engine().len().expect("len");

    let second = store.put("A", "B", "C").expect("second put");
    assert_eq!(first, second);

    // Only the sequence lease could have changed; no new rows.
    assert_eq!(store.engine().len().expect("len"), keys_after_first);

    let found = store.get("A", "B", "C").expect("get");
    assert_eq!(found, vec![first.object]);
}

#[test]
fn test_shared_values_reuse_ids() {
    let store = new_test_store();
    let a = store.put("alice", "knows", "bob").expect("put");
    let b = store.put("bob", "knows", "alice").expect("put");

    assert_eq!(a.subject, b.object);
    assert_eq!(a.object, b.subject);
    assert_eq!(a.predicate, b.predicate);
}
