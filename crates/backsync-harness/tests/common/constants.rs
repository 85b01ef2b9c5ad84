//! Shared constants for integration tests

use chrono::{DateTime, TimeZone, Utc};

pub const SOURCE_HA: &str = "ha";
pub const SOURCE_DRIVE: &str = "google";

pub const SLUG_A: &str = "A";
pub const SLUG_B: &str = "B";
pub const SLUG_C: &str = "C";

pub const SMALL_PADDING: usize = 500;
pub const ONE_MB_PADDING: usize = 1_000_000;

/// A fixed point in time, offset by `days`.
pub fn day(days: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap() + chrono::Duration::days(days as i64)
}
