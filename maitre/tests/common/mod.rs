//! Common test utilities for integration tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use maitre::operations::{FixedClock, TableRegistry};
use maitre::{CategoryId, Database, DatabaseConfig, NewCategory, NewTable, TableId};

/// A database file in a temporary directory that lives as long as the value.
pub struct TestStore {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl TestStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let store = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        // Opening once creates the schema
        store.open();
        store
    }

    /// Path of the database file.
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("maitre.db")
    }

    /// The temporary directory holding the database.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Opens a fresh handle with the default busy timeout.
    pub fn open(&self) -> Database {
        Database::open(DatabaseConfig::new(self.path())).unwrap()
    }

    /// Opens a fresh handle with a specific busy timeout.
    pub fn open_with_timeout(&self, timeout: Duration) -> Database {
        Database::open(DatabaseConfig::new(self.path()).with_busy_timeout(timeout)).unwrap()
    }
}

/// A fixed "now" before every booking date used in tests.
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2029, 12, 31)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// The clock all integration tests run against.
pub fn clock() -> FixedClock {
    FixedClock(now())
}

/// The booking date used throughout.
pub fn service_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
}

/// `hh:mm` on the service date.
pub fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Creates a catch-all category and one table per capacity, named `T1..`.
#[allow(dead_code)]
pub fn seed_tables(db: &Database, capacities: &[u32]) -> (CategoryId, Vec<TableId>) {
    let registry = TableRegistry::with_clock(db, clock());
    let category = registry
        .add_category(&NewCategory::new("Main room", 1, 20, None).unwrap())
        .unwrap();
    let tables = capacities
        .iter()
        .enumerate()
        .map(|(i, &capacity)| {
            let table = NewTable::builder(format!("T{}", i + 1), capacity, category)
                .build()
                .unwrap();
            registry.add_table(&table).unwrap()
        })
        .collect();
    (category, tables)
}
