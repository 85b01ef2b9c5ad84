//! Minimal synchronisation routines written only against `BackupSource`
//!
//! These stand in for the production engine so the double can be exercised
//! through the trait object rather than its inherent methods.

use backsync_core::{BackupSource, Result, Snapshot, SnapshotHandle};

/// Copies every snapshot that `to` lacks onto `to`. Returns how many were copied.
pub fn copy_missing(to: &mut dyn BackupSource, snapshots: &mut [Snapshot]) -> Result<usize> {
    let mut copied = 0;
    for snapshot in snapshots.iter_mut() {
        if snapshot.get_source(to.name()).is_none() {
            to.save(snapshot, None)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Deletes the oldest unretained copies on `source` until it holds at most
/// `max_count()` of them. A max of 0 means unbounded.
pub fn enforce_retention(source: &mut dyn BackupSource, snapshots: &mut [Snapshot]) -> Result<usize> {
    let max = source.max_count();
    if max == 0 {
        return Ok(0);
    }

    let name = source.name().to_string();
    let mut candidates: Vec<usize> = snapshots
        .iter()
        .enumerate()
        .filter(|(_, s)| s.get_source(&name).map(|r| !r.retained()).unwrap_or(false))
        .map(|(i, _)| i)
        .collect();
    candidates.sort_by_key(|&i| snapshots[i].date());

    let held = source.get()?.len();
    let mut deleted = 0;
    for index in candidates {
        if held - deleted <= max {
            break;
        }
        source.delete(&mut snapshots[index])?;
        deleted += 1;
    }
    Ok(deleted)
}
