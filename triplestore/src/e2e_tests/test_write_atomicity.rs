//! Test that a failed write leaves nothing behind.

use crate::engine::FaultConfig;
use crate::error::Error;
use crate::testing::new_faulty_store;
use crate::types::Pattern;

/// Writes made by the first `put` of three new values: per value a lease
/// refill (first value only), a forward row, and a reverse row, then three
/// index rows.
const FIRST_PUT_WRITES: u64 = 10;

#[test]
fn test_failure_at_any_write_commits_nothing() {
    for n in 1..=FIRST_PUT_WRITES {
        let store = new_faulty_store(0, FaultConfig::fail_nth_write(n));

        let result = store.put("alice", "knows", "bob");
        assert!(matches!(result, Err(Error::Engine(_))), "write #{n}");
        assert!(store.engine().is_empty().expect("len"), "write #{n}");
        assert!(
            store.get("alice", "knows", Pattern::Wildcard).expect("get").is_empty(),
            "write #{n}"
        );
    }
}

#[test]
fn test_failed_index_write_hides_every_ordering() {
    // Fail the second of the three index rows.
    let store = new_faulty_store(0, FaultConfig::fail_nth_write(FIRST_PUT_WRITES - 1));
    assert!(store.put("alice", "knows", "bob").is_err());

    assert!(
        store
            .triples(Pattern::Wildcard, Pattern::Wildcard, Pattern::Wildcard)
            .expect("scan")
            .is_empty()
    );
}

#[test]
fn test_store_recovers_after_failed_write() {
    let store = new_faulty_store(0, FaultConfig::fail_nth_write(5));
    assert!(store.put("alice", "knows", "bob").is_err());

    let triple = store.put("alice", "knows", "bob").expect("retry by caller");
    // The aborted lease was never durable, so counting starts over.
    assert_eq!(triple.subject.counter(), 0);
    assert_eq!(store.get("alice", "knows", "bob").expect("get"), vec![triple.object]);
}
