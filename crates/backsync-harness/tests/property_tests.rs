//! Property-based tests for filler bytes and fixture archives

use backsync_harness::{build_archive, fill, read_archive, Filler, TAR_RECORD_SIZE};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_fill_has_exact_length(size in 0usize..200_000) {
        prop_assert_eq!(fill(size).len(), size);
    }

    #[test]
    fn test_fill_is_deterministic(size in 0usize..200_000) {
        prop_assert_eq!(fill(size), fill(size));
    }

    #[test]
    fn test_fill_matches_iterator(size in 0usize..50_000) {
        let expected: Vec<u8> = Filler::new().take(size).collect();
        prop_assert_eq!(fill(size), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_archive_round_trip(
        slug in "[a-z0-9]{1,12}",
        name in "[A-Za-z ]{1,20}",
        padding in 0usize..100_000,
    ) {
        let date = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let archive = build_archive(&slug, &name, date, padding).unwrap();
        let metadata = read_archive(archive.as_bytes()).unwrap();

        prop_assert_eq!(&metadata.slug, &slug);
        prop_assert_eq!(&metadata.name, &name);
        prop_assert_eq!(metadata.size, Some(archive.size_mib()));
        prop_assert!(archive.len() >= padding);
        prop_assert_eq!(archive.len() % TAR_RECORD_SIZE, 0);
    }
}
