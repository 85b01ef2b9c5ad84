//! Logical snapshots and the contract backup sources rely on

use crate::record::SourceRecord;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::trace;

/// Operations a backup source needs from a logical snapshot.
///
/// Sources attach and detach their own [`SourceRecord`] through this trait;
/// they never own the snapshot.
pub trait SnapshotHandle {
    /// Identifier shared by every copy of this snapshot.
    fn slug(&self) -> &str;

    /// Display name.
    fn name(&self) -> &str;

    /// When the snapshot was taken.
    fn date(&self) -> DateTime<Utc>;

    /// The record held for `source_name`, if that source has a copy.
    fn get_source(&self, source_name: &str) -> Option<&SourceRecord>;

    /// Attaches a record, replacing any previous record from the same source.
    fn add_source(&mut self, record: SourceRecord);

    /// Detaches and returns the record held for `source_name`.
    fn remove_source(&mut self, source_name: &str) -> Option<SourceRecord>;
}

/// A logical snapshot and the copies each backup source holds of it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    slug: String,
    name: String,
    date: DateTime<Utc>,
    sources: BTreeMap<String, SourceRecord>,
}

impl Snapshot {
    /// Creates a snapshot with no source copies yet.
    pub fn new(slug: impl Into<String>, name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            date,
            sources: BTreeMap::new(),
        }
    }

    /// Creates a snapshot seeded from an existing record.
    pub fn from_record(record: SourceRecord) -> Self {
        let mut snapshot = Self::new(record.slug(), record.name(), record.date());
        snapshot.add_source(record);
        snapshot
    }

    pub fn sources(&self) -> impl Iterator<Item = &SourceRecord> {
        self.sources.values()
    }

    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    /// True once every source copy has been removed.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Whether `source_name` holds a copy and has marked it retained.
    pub fn retained_by(&self, source_name: &str) -> bool {
        self.sources
            .get(source_name)
            .map(SourceRecord::retained)
            .unwrap_or(false)
    }
}

impl SnapshotHandle for Snapshot {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn get_source(&self, source_name: &str) -> Option<&SourceRecord> {
        self.sources.get(source_name)
    }

    fn add_source(&mut self, record: SourceRecord) {
        trace!("Attaching {} copy to snapshot {}", record.source(), self.slug);
        self.sources.insert(record.source().to_string(), record);
    }

    fn remove_source(&mut self, source_name: &str) -> Option<SourceRecord> {
        trace!("Detaching {} copy from snapshot {}", source_name, self.slug);
        self.sources.remove(source_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_add_and_remove_sources() {
        let mut snapshot = Snapshot::new("abc", "Full Backup", date());
        assert!(snapshot.is_empty());

        snapshot.add_source(SourceRecord::new("Full Backup", date(), "ha", "abc"));
        snapshot.add_source(SourceRecord::new("Full Backup", date(), "google", "abc"));
        assert_eq!(snapshot.source_names().collect::<Vec<_>>(), vec!["google", "ha"]);
        assert_eq!(snapshot.get_source("ha").unwrap().source(), "ha");

        let removed = snapshot.remove_source("ha").unwrap();
        assert_eq!(removed.source(), "ha");
        assert!(snapshot.get_source("ha").is_none());
        assert!(snapshot.remove_source("ha").is_none());
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_from_record_mirrors_fields() {
        let record = SourceRecord::new("Weekly", date(), "ha", "weekly1");
        let snapshot = Snapshot::from_record(record.clone());
        assert_eq!(snapshot.slug(), "weekly1");
        assert_eq!(snapshot.name(), "Weekly");
        assert_eq!(snapshot.date(), date());
        assert!(snapshot.get_source("ha").unwrap().same_record(&record));
    }

    #[test]
    fn test_retained_by() {
        let record = SourceRecord::new("Weekly", date(), "ha", "weekly1");
        let snapshot = Snapshot::from_record(record.clone());
        assert!(!snapshot.retained_by("ha"));
        record.set_retained(true);
        assert!(snapshot.retained_by("ha"));
        assert!(!snapshot.retained_by("google"));
    }
}
