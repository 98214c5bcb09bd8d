//! Test that every value type materializes back to itself.

use crate::testing::new_test_store;
use crate::types::Value;

#[test]
fn test_every_value_type_round_trips() {
    let store = new_test_store();
    let objects = [
        Value::Null,
        Value::Boolean(true),
        Value::Boolean(false),
        Value::Integer(0),
        Value::Integer(-42),
        Value::Integer(i64::MAX),
        Value::Float(3.5),
        Value::Float(f64::MIN_POSITIVE),
        Value::string(""),
        Value::string("héllo wörld"),
        Value::Bytes(Vec::new()),
        Value::Bytes(vec![0, 1, 2, 255]),
        Value::string("z".repeat(5000)),
    ];

    let mut ids = Vec::new();
    for (i, object) in objects.iter().enumerate() {
        let index = i64::try_from(i).expect("small index");
        let triple = store.put("sample", index, object.clone()).expect("put");
        ids.push(triple.object);
    }

    assert_eq!(store.materialize(&ids).expect("materialize"), objects);
}

#[test]
fn test_types_do_not_collide() {
    let store = new_test_store();
    let as_int = store.put("n", "is", 1i64).expect("put");
    let as_string = store.put("n", "is", "1").expect("put");
    let as_bool = store.put("n", "is", true).expect("put");

    assert_ne!(as_int.object, as_string.object);
    assert_ne!(as_int.object, as_bool.object);
    assert_eq!(store.get("n", "is", crate::types::Pattern::Wildcard).expect("get").len(), 3);
}

#[test]
fn test_materialize_each_reports_per_id() {
    let store = new_test_store();
    let stored = store.put("a", "b", "c").expect("put");
    let missing = crate::types::SurrogateId::new(crate::types::IdTag::Direct, 12_345);

    let results = store
        .materialize_each(&[stored.subject, missing, stored.object])
        .expect("snapshot");
    assert_eq!(results[0].as_ref().expect("a"), &Value::string("a"));
    assert!(matches!(results[1], Err(crate::error::Error::NotFound(_))));
    assert_eq!(results[2].as_ref().expect("c"), &Value::string("c"));

    assert!(store.materialize(&[stored.subject, missing]).is_err());
}
