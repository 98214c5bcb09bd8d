//! Test values whose records are too large to be their own reverse key.

use crate::testing::new_test_store;
use crate::types::{IdTag, Pattern, Value};

#[test]
fn test_distinct_records_of_41_bytes() {
    // 35 payload bytes make a 41-byte record. The two values are told apart
    // only by their SHA-256 digests; digest equality is taken to mean value
    // equality.
    let store = new_test_store();
    let a = Value::string("x".repeat(35));
    let b = Value::string("y".repeat(35));

    let ta = store.put("doc", "body", a.clone()).expect("put");
    let tb = store.put("doc", "body", b.clone()).expect("put");
    assert_eq!(ta.object.tag(), IdTag::Hashed);
    assert_eq!(tb.object.tag(), IdTag::Hashed);
    assert_ne!(ta.object, tb.object);

    let ids = store.get("doc", "body", Pattern::Wildcard).expect("get");
    assert_eq!(ids.len(), 2);
    let mut values = store.materialize(&ids).expect("materialize");
    values.sort_by_key(ToString::to_string);
    assert_eq!(values, vec![a, b]);
}

#[test]
fn test_large_value_as_lookup_key() {
    let store = new_test_store();
    let blob = Value::Bytes((0..=255).collect());
    store.put(blob.clone(), "kind", "bytes").expect("put");

    let found = store.get(blob, "kind", Pattern::Wildcard).expect("get");
    assert_eq!(
        store.materialize(&found).expect("materialize"),
        vec![Value::string("bytes")]
    );
}
