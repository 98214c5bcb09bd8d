//! Test ID-list patterns, which match any of the listed IDs.

use crate::e2e_tests::helpers::{get_values, id_of, put_strings, strings};
use crate::testing::new_test_store;
use crate::types::Pattern;

#[test]
fn test_id_list_matches_any() {
    let store = new_test_store();
    put_strings(
        &store,
        &[
            ("alice", "knows", "bob"),
            ("bob", "knows", "carol"),
            ("carol", "knows", "dave"),
        ],
    );
    let people = vec![id_of(&store, "alice"), id_of(&store, "carol")];

    assert_eq!(
        get_values(&store, people, "knows", Pattern::Wildcard),
        strings(&["bob", "dave"])
    );
}

#[test]
fn test_id_lists_in_two_positions() {
    let store = new_test_store();
    put_strings(
        &store,
        &[
            ("alice", "knows", "bob"),
            ("alice", "likes", "carol"),
            ("bob", "likes", "dave"),
        ],
    );
    let subjects = vec![id_of(&store, "alice"), id_of(&store, "bob")];
    let predicates = vec![id_of(&store, "knows"), id_of(&store, "likes")];

    assert_eq!(
        get_values(&store, subjects, predicates, Pattern::Wildcard),
        strings(&["bob", "carol", "dave"])
    );
}

#[test]
fn test_empty_id_list_matches_nothing() {
    let store = new_test_store();
    put_strings(&store, &[("alice", "knows", "bob")]);
    let found = store
        .get(Pattern::Ids(Vec::new()), "knows", Pattern::Wildcard)
        .expect("get");
    assert!(found.is_empty());
}
