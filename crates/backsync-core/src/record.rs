//! Per-source snapshot records
//!
//! A [`SourceRecord`] is one backup source's copy of a logical snapshot.
//! Records are shared handles: cloning a record yields another view of the
//! same copy, so a retained flag toggled through the owning snapshot is seen
//! by every source that enumerates it.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct RecordState {
    name: String,
    date: DateTime<Utc>,
    source: String,
    slug: String,
    retained: AtomicBool,
}

/// One backup source's copy of a snapshot.
#[derive(Clone)]
pub struct SourceRecord {
    state: Arc<RecordState>,
}

impl SourceRecord {
    /// Creates a new, unretained record owned by `source`.
    pub fn new(
        name: impl Into<String>,
        date: DateTime<Utc>,
        source: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            state: Arc::new(RecordState {
                name: name.into(),
                date,
                source: source.into(),
                slug: slug.into(),
                retained: AtomicBool::new(false),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.state.date
    }

    /// Name of the backup source holding this copy.
    pub fn source(&self) -> &str {
        &self.state.source
    }

    pub fn slug(&self) -> &str {
        &self.state.slug
    }

    /// Whether the source has been told to keep this copy out of retention cleanup.
    pub fn retained(&self) -> bool {
        self.state.retained.load(Ordering::SeqCst)
    }

    pub fn set_retained(&self, retained: bool) {
        self.state.retained.store(retained, Ordering::SeqCst);
    }

    /// Returns true when both handles refer to the same copy.
    pub fn same_record(&self, other: &SourceRecord) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for SourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRecord")
            .field("name", &self.state.name)
            .field("date", &self.state.date)
            .field("source", &self.state.source)
            .field("slug", &self.state.slug)
            .field("retained", &self.retained())
            .finish()
    }
}
