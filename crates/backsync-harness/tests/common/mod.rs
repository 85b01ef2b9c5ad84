//! Common test infrastructure for backsync-harness integration tests
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Modules
//!
//! - `constants`: Source names, slugs and fixed timestamps
//! - `builders`: Fluent builder for snapshots spread across several sources
//! - `assertions`: Semantic assertions over snapshots and errors
//! - `sync`: A small retention/copy routine written against `BackupSource`

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod assertions;
pub mod builders;
pub mod constants;
pub mod sync;

pub use assertions::*;
pub use builders::*;
pub use constants::*;
pub use sync::*;
