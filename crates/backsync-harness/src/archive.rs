//! Fixture backup archives.
//!
//! A fixture archive is an uncompressed tar holding two entries: the
//! metadata document ([`METADATA_ENTRY`]) followed by deterministic padding
//! ([`PADDING_ENTRY`]) that brings the archive up to the size a test wants.
//! Headers carry fixed mode and mtime, so identical inputs always produce
//! identical bytes. The archive is zero-padded to a whole number of
//! [`TAR_RECORD_SIZE`] records, as classic tar writers do.

use crate::config::{AddonInfo, FixtureConfig, HostState};
use crate::filler::fill;
use backsync_core::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::io::{Cursor, Read};
use std::path::Path;
use tar::{Archive, Builder as TarBuilder, Header};
use tracing::debug;

/// Name of the metadata entry in a fixture archive.
pub const METADATA_ENTRY: &str = "snapshot.json";

/// Name of the padding entry in a fixture archive.
pub const PADDING_ENTRY: &str = "padding.dat";

/// Version reported for every archive read back by [`read_archive`].
pub const DEV_VERSION: &str = "dev";

/// Record size fixture archives are padded to.
pub const TAR_RECORD_SIZE: usize = 10_240;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Whether an archive covers everything or a chosen subset of add-ons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveKind {
    Full,
    Partial,
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveKind::Full => write!(f, "full"),
            ArchiveKind::Partial => write!(f, "partial"),
        }
    }
}

/// Metadata document stored as the first archive entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveMetadata {
    pub slug: String,

    pub name: String,

    pub date: DateTime<Utc>,

    #[serde(rename = "type")]
    pub kind: ArchiveKind,

    pub protected: bool,

    /// Host state at the time of the backup
    pub homeassistant: HostState,

    pub folders: Vec<String>,

    pub addons: Vec<AddonInfo>,

    pub repositories: Vec<String>,

    /// Total archive size in MiB, only set when read back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    /// Normalised to [`DEV_VERSION`] when read back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// An in-memory fixture archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureArchive {
    bytes: Vec<u8>,
}

impl FixtureArchive {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Serialized length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Serialized length in MiB, rounded to two decimals.
    pub fn size_mib(&self) -> f64 {
        size_in_mib(self.bytes.len())
    }

    /// A reader over the archive bytes, for APIs that take a stream.
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(&self.bytes)
    }

    /// Re-reads the metadata entry.
    pub fn metadata(&self) -> Result<ArchiveMetadata> {
        read_archive(&self.bytes)
    }
}

/// Builder for fixture archives.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    slug: String,
    name: String,
    date: DateTime<Utc>,
    padding: Option<usize>,
    folders: Option<Vec<String>>,
    addons: Option<BTreeSet<String>>,
    protected: bool,
    catalog: FixtureConfig,
}

impl ArchiveBuilder {
    /// Starts a full, unprotected archive using the default catalog.
    pub fn new(slug: impl Into<String>, name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            date,
            padding: None,
            folders: None,
            addons: None,
            protected: false,
            catalog: FixtureConfig::default(),
        }
    }

    /// Sets the padding size in bytes.
    pub fn padding(mut self, size: usize) -> Self {
        self.padding = Some(size);
        self
    }

    /// Restricts the folders listed in the metadata. An empty list means all
    /// catalog folders.
    pub fn folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let folders: Vec<String> = folders.into_iter().map(Into::into).collect();
        self.folders = (!folders.is_empty()).then_some(folders);
        self
    }

    /// Restricts the embedded add-ons to the given slugs and makes the archive
    /// partial. An empty set means no restriction.
    pub fn addons<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slugs: BTreeSet<String> = slugs.into_iter().map(Into::into).collect();
        self.addons = (!slugs.is_empty()).then_some(slugs);
        self
    }

    /// Marks the archive as password protected.
    pub fn protected(mut self, protected: bool) -> Self {
        self.protected = protected;
        self
    }

    /// Uses a custom catalog instead of the default one.
    pub fn catalog(mut self, catalog: &FixtureConfig) -> Self {
        self.catalog = catalog.clone();
        self
    }

    /// Builds the metadata document without serializing it.
    pub fn metadata(&self) -> ArchiveMetadata {
        let (kind, addons) = match &self.addons {
            Some(slugs) => (
                ArchiveKind::Partial,
                self.catalog
                    .addons
                    .iter()
                    .filter(|addon| slugs.contains(&addon.slug))
                    .cloned()
                    .collect(),
            ),
            None => (ArchiveKind::Full, self.catalog.addons.clone()),
        };

        ArchiveMetadata {
            slug: self.slug.clone(),
            name: self.name.clone(),
            date: self.date,
            kind,
            protected: self.protected,
            homeassistant: self.catalog.host.clone(),
            folders: self
                .folders
                .clone()
                .unwrap_or_else(|| self.catalog.folders.clone()),
            addons,
            repositories: self.catalog.repositories.clone(),
            size: None,
            version: None,
        }
    }

    /// Serializes the archive.
    pub fn build(self) -> Result<FixtureArchive> {
        let metadata = self.metadata();
        let document = serde_json::to_vec(&metadata)?;
        let padding = fill(self.padding.unwrap_or(self.catalog.default_padding));

        let mut tar = TarBuilder::new(Vec::new());
        append_entry(&mut tar, METADATA_ENTRY, &document)?;
        append_entry(&mut tar, PADDING_ENTRY, &padding)?;
        let mut bytes = tar.into_inner()?;
        bytes.resize(bytes.len().div_ceil(TAR_RECORD_SIZE) * TAR_RECORD_SIZE, 0);

        debug!(
            "Built {} fixture archive {} ({} bytes, {} padding)",
            metadata.kind,
            metadata.slug,
            bytes.len(),
            padding.len()
        );

        Ok(FixtureArchive { bytes })
    }
}

fn append_entry(tar: &mut TarBuilder<Vec<u8>>, name: &str, data: &[u8]) -> Result<()> {
    let mut header = Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(0);
    tar.append_data(&mut header, name, data)?;
    Ok(())
}

/// Builds a full archive with the default catalog.
pub fn build_archive(
    slug: &str,
    name: &str,
    date: DateTime<Utc>,
    padding_size: usize,
) -> Result<FixtureArchive> {
    ArchiveBuilder::new(slug, name, date)
        .padding(padding_size)
        .build()
}

/// Reads the metadata of an archive.
///
/// `size` is recomputed from the total length of `bytes` and `version` is
/// replaced by [`DEV_VERSION`], so metadata read from different builds
/// compares equal on everything the fixture actually controls.
pub fn read_archive(bytes: &[u8]) -> Result<ArchiveMetadata> {
    let mut archive = Archive::new(bytes);
    let entries = archive
        .entries()
        .map_err(|e| Error::corrupt_archive(format!("Unreadable archive: {}", e)))?;

    for entry in entries {
        let mut entry =
            entry.map_err(|e| Error::corrupt_archive(format!("Unreadable archive entry: {}", e)))?;

        let is_metadata = entry
            .path()
            .map(|path| path.as_ref() == Path::new(METADATA_ENTRY))
            .unwrap_or(false);
        if !is_metadata {
            continue;
        }

        let mut content = Vec::new();
        entry.read_to_end(&mut content).map_err(|e| {
            Error::corrupt_archive(format!("Failed to read {}: {}", METADATA_ENTRY, e))
        })?;

        let mut metadata: ArchiveMetadata = serde_json::from_slice(&content).map_err(|e| {
            Error::corrupt_archive(format!("Failed to parse {}: {}", METADATA_ENTRY, e))
        })?;
        metadata.size = Some(size_in_mib(bytes.len()));
        metadata.version = Some(DEV_VERSION.to_string());
        return Ok(metadata);
    }

    Err(Error::corrupt_archive(format!(
        "{} not found in archive",
        METADATA_ENTRY
    )))
}

fn size_in_mib(bytes: usize) -> f64 {
    (bytes as f64 / BYTES_PER_MIB * 100.0).round() / 100.0
}
