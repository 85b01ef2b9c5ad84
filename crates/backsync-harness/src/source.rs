//! In-memory backup source double
//!
//! [`TestSource`] implements [`BackupSource`] against a map of slug to
//! [`SourceRecord`] and records every create, save and delete so tests can
//! assert exactly what the code under test did to it.

use backsync_core::{
    BackupSource, CreateOptions, Error, Result, SnapshotHandle, SourceRecord,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::debug;

/// Expected history and current counts for [`TestSource::assert_that`].
///
/// Fields left at their default are expected to be zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceCounts {
    pub created: usize,
    pub deleted: usize,
    pub saved: usize,
    pub current: usize,
}

/// A backup source that lives entirely in memory.
#[derive(Debug)]
pub struct TestSource {
    name: String,
    enabled: bool,
    max: usize,
    index: usize,
    current: BTreeMap<String, SourceRecord>,
    created: Vec<SourceRecord>,
    saved: Vec<SourceRecord>,
    deleted: Vec<SourceRecord>,
}

impl TestSource {
    /// Creates an enabled, empty source.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            max: 0,
            index: 0,
            current: BTreeMap::new(),
            created: Vec::new(),
            saved: Vec::new(),
            deleted: Vec::new(),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    pub fn set_max(&mut self, count: usize) -> &mut Self {
        self.max = count;
        self
    }

    /// Seeds a record straight into the current view, bypassing history.
    ///
    /// The slug defaults to the name.
    pub fn insert(
        &mut self,
        name: &str,
        date: DateTime<Utc>,
        slug: Option<&str>,
    ) -> SourceRecord {
        let record = SourceRecord::new(name, date, &self.name, slug.unwrap_or(name));
        self.current.insert(record.slug().to_string(), record.clone());
        record
    }

    /// Clears the created, saved and deleted histories. The current view is
    /// left untouched.
    pub fn reset(&mut self) -> &mut Self {
        self.created.clear();
        self.saved.clear();
        self.deleted.clear();
        self
    }

    pub fn created(&self) -> &[SourceRecord] {
        &self.created
    }

    pub fn saved(&self) -> &[SourceRecord] {
        &self.saved
    }

    pub fn deleted(&self) -> &[SourceRecord] {
        &self.deleted
    }

    /// The current view without the enabled check.
    pub fn current(&self) -> &BTreeMap<String, SourceRecord> {
        &self.current
    }

    /// Panics unless the histories and current view have exactly these sizes.
    #[track_caller]
    pub fn assert_that(&self, expected: SourceCounts) -> &Self {
        assert_eq!(
            self.saved.len(),
            expected.saved,
            "source '{}': expected {} saved but found {:?}",
            self.name,
            expected.saved,
            self.saved
        );
        assert_eq!(
            self.deleted.len(),
            expected.deleted,
            "source '{}': expected {} deleted but found {:?}",
            self.name,
            expected.deleted,
            self.deleted
        );
        assert_eq!(
            self.created.len(),
            expected.created,
            "source '{}': expected {} created but found {:?}",
            self.name,
            expected.created,
            self.created
        );
        assert_eq!(
            self.current.len(),
            expected.current,
            "source '{}': expected {} current but found {:?}",
            self.name,
            expected.current,
            self.current.keys().collect::<Vec<_>>()
        );
        self
    }

    /// Panics if anything was created, saved or deleted since the last reset.
    #[track_caller]
    pub fn assert_unchanged(&self) -> &Self {
        self.assert_that(SourceCounts {
            current: self.current.len(),
            ..SourceCounts::default()
        })
    }

    fn ensure_enabled(&self) -> Result<()> {
        if self.enabled {
            Ok(())
        } else {
            Err(Error::disabled_source(&self.name))
        }
    }
}

impl BackupSource for TestSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn max_count(&self) -> usize {
        self.max
    }

    fn get(&self) -> Result<&BTreeMap<String, SourceRecord>> {
        self.ensure_enabled()?;
        Ok(&self.current)
    }

    fn create(&mut self, options: &CreateOptions) -> Result<SourceRecord> {
        self.ensure_enabled()?;

        // Seeded records may already hold a generated slug
        let mut slug = format!("{}slug{}", self.name, self.index);
        while self.current.contains_key(&slug) {
            self.index += 1;
            slug = format!("{}slug{}", self.name, self.index);
        }
        self.index += 1;

        let record = SourceRecord::new(&options.name_template, options.when, &self.name, slug);
        debug!("{}: created {}", self.name, record.slug());

        self.current.insert(record.slug().to_string(), record.clone());
        self.created.push(record.clone());
        Ok(record)
    }

    fn save(
        &mut self,
        snapshot: &mut dyn SnapshotHandle,
        _data: Option<&[u8]>,
    ) -> Result<SourceRecord> {
        self.ensure_enabled()?;

        if self.current.contains_key(snapshot.slug()) {
            return Err(Error::duplicate_slug(&self.name, snapshot.slug()));
        }

        let record = SourceRecord::new(snapshot.name(), snapshot.date(), &self.name, snapshot.slug());
        snapshot.add_source(record.clone());
        debug!("{}: saved {}", self.name, record.slug());

        self.current.insert(record.slug().to_string(), record.clone());
        self.saved.push(record.clone());
        Ok(record)
    }

    fn delete(&mut self, snapshot: &mut dyn SnapshotHandle) -> Result<()> {
        self.ensure_enabled()?;

        let slug = snapshot.slug().to_string();
        let owner = match snapshot.get_source(&self.name) {
            Some(record) => record.source().to_string(),
            None => {
                return Err(Error::inconsistent_state(
                    &self.name,
                    slug,
                    "snapshot holds no record for this source",
                ))
            }
        };
        if owner != self.name {
            return Err(Error::inconsistent_state(
                &self.name,
                slug,
                format!("record is owned by '{}'", owner),
            ));
        }
        if !self.current.contains_key(&slug) {
            return Err(Error::inconsistent_state(
                &self.name,
                slug,
                "slug is not held by this source",
            ));
        }

        if let Some(record) = snapshot.remove_source(&self.name) {
            self.deleted.push(record);
        }
        self.current.remove(&slug);
        debug!("{}: deleted {}", self.name, slug);
        Ok(())
    }

    fn read(&self, _record: &SourceRecord) -> Result<Option<Box<dyn Read + Send>>> {
        self.ensure_enabled()?;
        Ok(None)
    }

    fn retain(&mut self, snapshot: &mut dyn SnapshotHandle, retain: bool) -> Result<()> {
        self.ensure_enabled()?;

        match snapshot.get_source(&self.name) {
            Some(record) => {
                record.set_retained(retain);
                debug!("{}: retained {} = {}", self.name, record.slug(), retain);
                Ok(())
            }
            None => Err(Error::inconsistent_state(
                &self.name,
                snapshot.slug(),
                "snapshot holds no record for this source",
            )),
        }
    }
}
