//! SQLite record store for tables, reservations, and the waitlist.
//!
//! Queries are associated functions taking a `&Connection`, so the same call
//! works on a plain connection or inside a [`rusqlite::Transaction`]. The
//! engine in [`crate::operations`] composes them inside IMMEDIATE
//! transactions.
//!
//! # Examples
//!
//! ```no_run
//! use maitre::database::{Database, DatabaseConfig};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/maitre.db")).unwrap();
//! for table in Database::list_tables(db.connection()).unwrap() {
//!     println!("{} seats {}", table.number, table.capacity);
//! }
//! ```

mod codec;
mod config;
mod connection;
pub mod migrations;
mod reports;
mod reservations;
mod schema;
mod tables;
mod transaction;
mod waitlist;

#[cfg(test)]
pub mod test_util;

pub use codec::{DATE_FORMAT, TIMESTAMP_FORMAT, TIME_FORMAT};
pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use transaction::commit;
pub use waitlist::NewWaitlistEntry;
