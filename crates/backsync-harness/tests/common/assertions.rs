//! Assertion helpers for snapshot and source tests

use backsync_core::{Snapshot, SnapshotHandle};

/// Assert that a snapshot holds a copy on `source`
#[track_caller]
pub fn assert_held_by(snapshot: &Snapshot, source: &str) {
    assert!(
        snapshot.get_source(source).is_some(),
        "Expected snapshot '{}' to be held by '{}' but it is held by {:?}",
        snapshot.slug(),
        source,
        snapshot.source_names().collect::<Vec<_>>()
    );
}

/// Assert that a snapshot has no copy on `source`
#[track_caller]
pub fn assert_not_held_by(snapshot: &Snapshot, source: &str) {
    assert!(
        snapshot.get_source(source).is_none(),
        "Expected snapshot '{}' not to be held by '{}'",
        snapshot.slug(),
        source
    );
}

/// Assert that an error message contains the expected pattern
#[track_caller]
pub fn assert_error_contains<T: std::fmt::Debug, E: std::fmt::Display>(
    result: &Result<T, E>,
    pattern: &str,
) {
    assert!(result.is_err(), "Expected error but got Ok");
    let error_msg = result.as_ref().unwrap_err().to_string();
    assert!(
        error_msg.contains(pattern),
        "Expected error containing '{}' but got: {}",
        pattern,
        error_msg
    );
}
