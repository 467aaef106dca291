#![allow(dead_code)]

use std::path::PathBuf;

use sortbench::Record;

pub mod sort_behavior;

pub fn test_dir() -> PathBuf {
    test_dir_with_name("test_runs")
}

pub fn test_dir_with_name(name: &str) -> PathBuf {
    let dir = PathBuf::from(format!("./{}", name));
    std::fs::create_dir_all(&dir).expect("Failed to create test directory");
    dir
}

/// Builds records from `(id, first_name)` pairs with an empty last name.
pub fn records(rows: &[(i64, &str)]) -> Vec<Record> {
    rows.iter()
        .map(|&(id, first)| Record::new(id, first, ""))
        .collect()
}

pub fn ids(records: &[Record]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
}
