//! Backsync Test Harness
//!
//! Deterministic stand-ins for testing code written against the
//! `BackupSource` contract without a real storage backend.
//!
//! # Features
//!
//! - **Source double**: [`TestSource`] implements `BackupSource` in memory and
//!   records every create, save and delete for later assertions
//! - **Fixture archives**: [`ArchiveBuilder`] produces byte-identical tar
//!   archives with a metadata document and deterministic padding, and
//!   [`read_archive`] parses them back
//! - **Filler**: [`fill`] yields reproducible, non-repeating padding bytes
//! - **Lock blocker**: [`LockBlocker`] holds a lock on a background thread so
//!   contention can be tested deterministically
//!
//! # Examples
//!
//! ```
//! use backsync_core::{BackupSource, Snapshot, SnapshotHandle};
//! use backsync_harness::{SourceCounts, TestSource};
//! use chrono::Utc;
//!
//! let mut source = TestSource::new("google");
//! let mut snapshot = Snapshot::new("abc123", "Nightly", Utc::now());
//!
//! source.save(&mut snapshot, None).unwrap();
//! source.assert_that(SourceCounts { saved: 1, current: 1, ..Default::default() });
//! assert!(snapshot.get_source("google").is_some());
//! ```

pub mod archive;
pub mod blocker;
pub mod config;
pub mod filler;
pub mod logging;
pub mod source;

// Re-export commonly used types
pub use archive::{
    build_archive, read_archive, ArchiveBuilder, ArchiveKind, ArchiveMetadata, FixtureArchive,
    DEV_VERSION, METADATA_ENTRY, PADDING_ENTRY, TAR_RECORD_SIZE,
};
pub use blocker::{BlockGuard, HoldableLock, LockBlocker};
pub use config::{AddonInfo, FixtureConfig, HostState, DEFAULT_PADDING};
pub use filler::{fill, filler_reader, Filler};
pub use logging::init_test_logging;
pub use source::{SourceCounts, TestSource};
