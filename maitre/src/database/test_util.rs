//! Shared test utilities for database unit tests.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::ids::{CategoryId, TableId};
use crate::table::{NewCategory, NewTable};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// A fixed "now" well before the 2030 dates tests book against.
///
/// # Panics
///
/// Never; the date is a valid constant.
#[must_use]
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2029, 6, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

/// Returns the id of the catch-all test category, creating it if needed.
///
/// # Panics
///
/// Panics if the category cannot be stored.
pub fn test_category(conn: &Connection) -> CategoryId {
    let existing = Database::list_categories(conn)
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Any");
    existing.map_or_else(
        || Database::insert_category(conn, &NewCategory::new("Any", 1, 20, None).unwrap()).unwrap(),
        |c| c.id,
    )
}

/// Inserts an `Available` table in the catch-all category.
///
/// # Panics
///
/// Panics if the table cannot be stored.
pub fn insert_test_table(conn: &Connection, number: &str, capacity: u32) -> TableId {
    let category = test_category(conn);
    let table = NewTable::builder(number, capacity, category).build().unwrap();
    Database::insert_table(conn, &table, test_now()).unwrap()
}
