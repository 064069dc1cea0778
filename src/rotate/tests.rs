use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use proptest::prelude::*;

use super::select::{FileEntry, FileStat, deletion_suffix, sort_entries};
use super::unit::Budget;
use crate::error::RotateError;

const ORDER_BY: [&str; 6] = [
    "name",
    "size",
    "date_atime",
    "date_mtime",
    "date_ctime",
    "date_birthtime",
];

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

fn entry(name: &str, size: u64, secs: u64) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        path: PathBuf::from("/rotate").join(name),
        stat: FileStat {
            size,
            accessed: at(secs),
            modified: at(secs),
            changed: at(secs),
            created: Some(at(secs)),
            is_file: true,
        },
    }
}

fn names(entries: &[FileEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

// Property test strategies

/// Generate a set of entries with distinct names
fn entries_strategy() -> impl Strategy<Value = Vec<FileEntry>> {
    prop::collection::btree_map("[a-z0-9_.]{1,12}", (0u64..5_000, 0u64..1_000), 0..24).prop_map(
        |files| {
            files
                .into_iter()
                .map(|(name, (size, secs))| entry(&name, size, secs))
                .collect::<Vec<_>>()
        },
    )
}

#[test]
fn test_sort_by_name() {
    let mut files = vec![entry("ase", 90, 1), entry("asd", 100, 2)];

    sort_entries(&mut files, "name", "asc").unwrap();
    assert_eq!(names(&files), ["asd", "ase"]);

    sort_entries(&mut files, "name", "desc").unwrap();
    assert_eq!(names(&files), ["ase", "asd"]);
}

#[test]
fn test_sort_by_size_and_times() {
    let mut files = vec![entry("b", 30, 10), entry("a", 10, 30), entry("c", 20, 20)];

    sort_entries(&mut files, "size", "asc").unwrap();
    assert_eq!(names(&files), ["a", "c", "b"]);

    sort_entries(&mut files, "date_mtime", "asc").unwrap();
    assert_eq!(names(&files), ["b", "c", "a"]);

    sort_entries(&mut files, "date_birthtime", "desc").unwrap();
    assert_eq!(names(&files), ["a", "c", "b"]);
}

#[test]
fn test_sort_ties_fall_back_to_name() {
    let mut files = vec![entry("c", 5, 1), entry("a", 5, 1), entry("b", 5, 1)];

    sort_entries(&mut files, "size", "asc").unwrap();
    assert_eq!(names(&files), ["a", "b", "c"]);

    sort_entries(&mut files, "date_ctime", "desc").unwrap();
    assert_eq!(names(&files), ["c", "b", "a"]);
}

#[test]
fn test_birth_time_falls_back_to_change_time() {
    let mut older = entry("older", 1, 10);
    let mut newer = entry("newer", 1, 20);
    older.stat.created = None;
    newer.stat.created = None;
    let mut files = vec![newer, older];

    sort_entries(&mut files, "date_birthtime", "asc").unwrap();
    assert_eq!(names(&files), ["older", "newer"]);
}

#[test]
fn test_sort_rejects_unknown_values() {
    let mut files = vec![entry("a", 1, 1), entry("b", 2, 2)];

    let err = sort_entries(&mut files, "foo", "asc").unwrap_err();
    assert!(matches!(err, RotateError::InvalidConfig(_)));
    assert!(err.to_string().contains("orderBy 'foo'"));

    let err = sort_entries(&mut files, "name", "up").unwrap_err();
    assert!(err.to_string().contains("orderDir 'up'"));

    // validated even when there is nothing to compare
    assert!(sort_entries(&mut [], "foo", "asc").is_err());
}

#[test]
fn test_count_budget() {
    let files = vec![entry("a", 1, 1), entry("b", 1, 2), entry("c", 1, 3)];

    assert_eq!(
        names(&deletion_suffix(files.clone(), Budget::Count(1))),
        ["b", "c"]
    );
    assert!(deletion_suffix(files.clone(), Budget::Count(3)).is_empty());
    assert!(deletion_suffix(files.clone(), Budget::Count(10)).is_empty());
    assert_eq!(deletion_suffix(files, Budget::Count(0)).len(), 3);
}

#[test]
fn test_byte_budget_straddles_file_size() {
    // 90 + 100 = 190 bytes in ascending size order
    let files = vec![entry("ase", 90, 1), entry("asd", 100, 2)];

    assert_eq!(
        names(&deletion_suffix(files.clone(), Budget::Bytes(189.0))),
        ["asd"]
    );
    assert!(deletion_suffix(files.clone(), Budget::Bytes(190.0)).is_empty());
    assert_eq!(
        names(&deletion_suffix(files.clone(), Budget::Bytes(89.0))),
        ["ase", "asd"]
    );
    assert_eq!(deletion_suffix(files, Budget::Bytes(0.0)).len(), 2);
}

#[test]
fn test_byte_budget_does_not_skip_ahead() {
    // a small file after the overflow point is still deleted
    let files = vec![entry("big", 100, 1), entry("huge", 500, 2), entry("tiny", 1, 3)];

    assert_eq!(
        names(&deletion_suffix(files, Budget::Bytes(150.0))),
        ["huge", "tiny"]
    );
}

#[test]
fn test_empty_files_fit_zero_budget() {
    let files = vec![entry("a", 0, 1), entry("b", 0, 2)];
    assert!(deletion_suffix(files, Budget::Bytes(0.0)).is_empty());
}

proptest! {
    #[test]
    fn test_count_budget_property(
        files in entries_strategy(),
        max_files in 0usize..30,
        order_by in prop::sample::select(ORDER_BY.to_vec()),
    ) {
        let total = files.len();
        let mut sorted = files;
        sort_entries(&mut sorted, order_by, "asc").unwrap();
        let expected_tail = sorted[max_files.min(total)..].to_vec();

        let deleted = deletion_suffix(sorted, Budget::Count(max_files));

        prop_assert_eq!(deleted.len(), total.saturating_sub(max_files));
        prop_assert_eq!(deleted, expected_tail);
    }

    #[test]
    fn test_byte_budget_property(
        files in entries_strategy(),
        max_bytes in 0u64..40_000,
        order_by in prop::sample::select(ORDER_BY.to_vec()),
        order_dir in prop::sample::select(vec!["asc", "desc"]),
    ) {
        let mut sorted = files;
        sort_entries(&mut sorted, order_by, order_dir).unwrap();
        let total = sorted.len();

        let deleted = deletion_suffix(sorted.clone(), Budget::Bytes(max_bytes as f64));
        let kept = &sorted[..total - deleted.len()];
        let kept_bytes: u64 = kept.iter().map(|e| e.stat.size).sum();

        // the retained prefix fits and the deletion set is a suffix
        prop_assert!(kept_bytes <= max_bytes);
        prop_assert_eq!(&sorted[kept.len()..], deleted.as_slice());
        // the first deleted file is the one that overflows the budget
        if let Some(first) = deleted.first() {
            prop_assert!(kept_bytes + first.stat.size > max_bytes);
        }
    }

    #[test]
    fn test_desc_reverses_asc(
        files in entries_strategy(),
        order_by in prop::sample::select(ORDER_BY.to_vec()),
    ) {
        let mut asc = files.clone();
        let mut desc = files;
        sort_entries(&mut asc, order_by, "asc").unwrap();
        sort_entries(&mut desc, order_by, "desc").unwrap();

        desc.reverse();
        prop_assert_eq!(asc, desc);
    }

    #[test]
    fn test_sort_is_deterministic(
        files in entries_strategy(),
        order_by in prop::sample::select(ORDER_BY.to_vec()),
    ) {
        let mut forward = files.clone();
        let mut backward = files;
        backward.reverse();
        sort_entries(&mut forward, order_by, "asc").unwrap();
        sort_entries(&mut backward, order_by, "asc").unwrap();

        prop_assert_eq!(forward, backward);
    }
}
