//! The capability contract every backup source implements
//!
//! Synchronisation code is written against [`BackupSource`] so a real storage
//! backend and an in-memory double can be swapped freely.

use crate::error::Result;
use crate::record::SourceRecord;
use crate::snapshot::SnapshotHandle;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io::Read;

/// Options for creating a brand new snapshot on a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    /// When the snapshot is taken
    pub when: DateTime<Utc>,

    /// Name given to the new snapshot
    pub name_template: String,
}

impl CreateOptions {
    pub fn new(when: DateTime<Utc>, name_template: impl Into<String>) -> Self {
        Self {
            when,
            name_template: name_template.into(),
        }
    }
}

/// A place snapshots can be created in, copied to, read from and deleted from.
pub trait BackupSource {
    /// Stable name of this source, used as the key in a snapshot's source map.
    fn name(&self) -> &str;

    fn enabled(&self) -> bool;

    /// Retention ceiling; how 0 is interpreted is up to the caller.
    fn max_count(&self) -> usize;

    /// Current copies held by this source, keyed by slug.
    fn get(&self) -> Result<&BTreeMap<String, SourceRecord>>;

    /// Creates a new snapshot directly on this source.
    fn create(&mut self, options: &CreateOptions) -> Result<SourceRecord>;

    /// Copies `snapshot` onto this source and attaches the new record to it.
    fn save(
        &mut self,
        snapshot: &mut dyn SnapshotHandle,
        data: Option<&[u8]>,
    ) -> Result<SourceRecord>;

    /// Removes this source's copy of `snapshot` and detaches it.
    fn delete(&mut self, snapshot: &mut dyn SnapshotHandle) -> Result<()>;

    /// Opens the archive bytes of a copy, if this source can serve them.
    fn read(&self, record: &SourceRecord) -> Result<Option<Box<dyn Read + Send>>>;

    /// Marks this source's copy of `snapshot` as retained or not.
    fn retain(&mut self, snapshot: &mut dyn SnapshotHandle, retain: bool) -> Result<()>;
}
