//! End-to-end tests at the store API level.
//!
//! Each test file covers a specific scenario, driving a whole store through
//! `put`, `get`, `triples`, and `materialize`.

#![cfg(test)]

mod helpers;

mod test_alice_knows_bob;
mod test_concurrent_puts;
mod test_id_list_patterns;
mod test_idempotent_put;
mod test_index_completeness;
mod test_large_values;
mod test_round_trip;
mod test_threshold_routing;
mod test_triple_scan;
mod test_underconstrained;
mod test_unresolved_values;
mod test_write_atomicity;
mod test_write_retry;
