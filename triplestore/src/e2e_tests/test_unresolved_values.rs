//! Test lookups on an empty store and on values that were never stored.

use crate::testing::new_test_store;
use crate::types::{Pattern, Value};

#[test]
fn test_get_on_empty_store() {
    let store = new_test_store();
    assert!(store.get("a", "b", Pattern::Wildcard).expect("get").is_empty());
    assert!(store.get("a", "b", "c").expect("get").is_empty());
    assert_eq!(store.lookup(&Value::string("a")).expect("lookup"), None);
}

#[test]
fn test_get_does_not_create_values() {
    let store = new_test_store();
    store.get("new", "values", Pattern::Wildcard).expect("get");
    assert!(store.engine().is_empty().expect("len"));
}
