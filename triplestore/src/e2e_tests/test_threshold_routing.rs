//! Test that record size decides between direct and hashed IDs.

use crate::constants::HASHED_ID_OFFSET;
use crate::testing::new_test_store;
use crate::types::{IdTag, Value};

#[test]
fn test_direct_up_to_threshold_hashed_above() {
    let store = new_test_store();
    // Record = tag + type + 4-byte length + payload, so 34 bytes of payload
    // is exactly 40.
    let at_threshold = Value::string("a".repeat(34));
    let above_threshold = Value::string("a".repeat(35));

    let triple = store
        .put(at_threshold, "next", above_threshold)
        .expect("put");

    assert_eq!(triple.subject.tag(), IdTag::Direct);
    assert!(triple.subject.counter() < HASHED_ID_OFFSET);
    assert_eq!(triple.object.tag(), IdTag::Hashed);
    assert!(triple.object.counter() >= HASHED_ID_OFFSET);
}

#[test]
fn test_counter_is_shared_between_spaces() {
    let store = new_test_store();
    let triple = store
        .put(1i64, Value::string("p".repeat(100)), 2i64)
        .expect("put");

    assert_eq!(triple.subject.counter(), 0);
    assert_eq!(triple.predicate.counter(), HASHED_ID_OFFSET + 1);
    assert_eq!(triple.object.counter(), 2);
}
