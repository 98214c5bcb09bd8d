//! Test that every stored triple is reachable through every two-bound lookup.

use crate::e2e_tests::helpers::put_strings;
use crate::testing::new_test_store;
use crate::types::Pattern;

#[test]
fn test_every_triple_reachable_from_every_pair() {
    let store = new_test_store();
    let facts = [
        ("alice", "knows", "bob"),
        ("bob", "knows", "carol"),
        ("carol", "likes", "alice"),
        ("alice", "likes", "alice"),
        ("dave", "owns", "car"),
    ];
    put_strings(&store, &facts);

    for triple in store
        .triples(Pattern::Wildcard, Pattern::Wildcard, Pattern::Wildcard)
        .expect("scan")
    {
        let (s, p, o) = (triple.subject, triple.predicate, triple.object);
        assert!(store.get(s, p, Pattern::Wildcard).expect("get").contains(&o));
        assert!(store.get(Pattern::Wildcard, p, o).expect("get").contains(&s));
        assert!(store.get(s, Pattern::Wildcard, o).expect("get").contains(&p));
        assert!(!store.get(s, p, o).expect("get").is_empty());
    }

    assert_eq!(
        store
            .triples(Pattern::Wildcard, Pattern::Wildcard, Pattern::Wildcard)
            .expect("scan")
            .len(),
        facts.len()
    );
}

#[test]
fn test_missing_triple_is_empty() {
    let store = new_test_store();
    put_strings(&store, &[("alice", "knows", "bob"), ("bob", "likes", "carol")]);

    assert!(store.get("alice", "likes", "carol").expect("get").is_empty());
    assert!(store.get("bob", "knows", Pattern::Wildcard).expect("get").is_empty());
}
