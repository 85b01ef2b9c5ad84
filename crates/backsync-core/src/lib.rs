//! # backsync-core
//!
//! Core contracts for the backsync backup synchronisation system:
//! - The `BackupSource` capability trait implemented by storage backends
//! - Logical snapshots and per-source records
//! - Dotted version identifiers
//! - The shared error taxonomy

pub mod error;
pub mod record;
pub mod snapshot;
pub mod source;
pub mod version;

pub use error::{Error, Result};
pub use record::SourceRecord;
pub use snapshot::{Snapshot, SnapshotHandle};
pub use source::{BackupSource, CreateOptions};
pub use version::Version;
