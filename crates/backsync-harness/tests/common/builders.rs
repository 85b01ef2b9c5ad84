//! Builders for multi-source fixtures

use backsync_core::{Snapshot, SnapshotHandle, SourceRecord};
use backsync_harness::TestSource;
use chrono::{DateTime, Utc};

/// Builds a snapshot and seeds copies of it into the given sources.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    slug: String,
    name: String,
    date: DateTime<Utc>,
}

impl SnapshotBuilder {
    pub fn new(slug: &str, date: DateTime<Utc>) -> Self {
        Self {
            slug: slug.to_string(),
            name: format!("Snapshot {}", slug),
            date,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Builds the snapshot with no copies.
    pub fn build(self) -> Snapshot {
        Snapshot::new(self.slug, self.name, self.date)
    }

    /// Builds the snapshot with a copy inserted into each of `sources`.
    pub fn held_by(self, sources: &mut [&mut TestSource]) -> Snapshot {
        let mut snapshot = Snapshot::new(&self.slug, &self.name, self.date);
        for source in sources.iter_mut() {
            let record: SourceRecord = source.insert(&self.name, self.date, Some(self.slug.as_str()));
            snapshot.add_source(record);
        }
        snapshot
    }
}
