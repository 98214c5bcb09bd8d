//! Test whole-triple scans for every combination of bound positions.

use crate::e2e_tests::helpers::{id_of, put_strings};
use crate::testing::new_disk_store;
use crate::types::{Pattern, Triple};

#[test]
fn test_triples_for_every_bound_combination() {
    let (_dir, store) = new_disk_store();
    put_strings(
        &store,
        &[
            ("alice", "knows", "bob"),
            ("alice", "knows", "carol"),
            ("bob", "knows", "carol"),
            ("alice", "likes", "carol"),
        ],
    );
    let alice = id_of(&store, "alice");
    let knows = id_of(&store, "knows");
    let carol = id_of(&store, "carol");

    let count = |s: Pattern, p: Pattern, o: Pattern| store.triples(s, p, o).expect("scan").len();
    let any = || Pattern::Wildcard;

    assert_eq!(count(any(), any(), any()), 4);
    assert_eq!(count(alice.into(), any(), any()), 3);
    assert_eq!(count(any(), knows.into(), any()), 3);
    assert_eq!(count(any(), any(), carol.into()), 3);
    assert_eq!(count(alice.into(), knows.into(), any()), 2);
    assert_eq!(count(any(), knows.into(), carol.into()), 2);
    assert_eq!(count(alice.into(), any(), carol.into()), 2);
    assert_eq!(count(alice.into(), knows.into(), carol.into()), 1);
}

#[test]
fn test_object_only_scan_returns_whole_triples() {
    let (_dir, store) = new_disk_store();
    put_strings(&store, &[("alice", "knows", "bob"), ("carol", "likes", "bob")]);

    let mut found = store
        .triples(Pattern::Wildcard, Pattern::Wildcard, "bob")
        .expect("scan");
    found.sort();

    let mut expected = vec![
        Triple::new(id_of(&store, "alice"), id_of(&store, "knows"), id_of(&store, "bob")),
        Triple::new(id_of(&store, "carol"), id_of(&store, "likes"), id_of(&store, "bob")),
    ];
    expected.sort();
    assert_eq!(found, expected);
}

#[test]
fn test_triples_with_unresolved_value() {
    let (_dir, store) = new_disk_store();
    put_strings(&store, &[("alice", "knows", "bob")]);
    assert!(
        store
            .triples("nobody", Pattern::Wildcard, Pattern::Wildcard)
            .expect("scan")
            .is_empty()
    );
}
