//! Dining-room setup: categories, tables, and manual status changes.

use crate::database::Database;
use crate::error::{Error, Result};
use crate::ids::{CategoryId, TableId};
use crate::table::{NewCategory, NewTable, Table, TableCategory, TableStatus};

use super::clock::{Clock, SystemClock};

/// Manages the set of tables reservations can be made against.
#[derive(Debug)]
pub struct TableRegistry<'a, C: Clock = SystemClock> {
    db: &'a Database,
    clock: C,
}

impl<'a> TableRegistry<'a, SystemClock> {
    /// Creates a registry that stamps changes with the system clock.
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            clock: SystemClock,
        }
    }
}

impl<'a, C: Clock> TableRegistry<'a, C> {
    /// Creates a registry with a custom clock.
    pub fn with_clock(db: &'a Database, clock: C) -> Self {
        Self { db, clock }
    }

    /// Stores a new category.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the name is taken.
    pub fn add_category(&self, category: &NewCategory) -> Result<CategoryId> {
        let id = Database::insert_category(self.db.connection(), category)?;
        log::info!(
            "category {id} '{}' added ({}-{} seats)",
            category.name,
            category.min_capacity,
            category.max_capacity
        );
        Ok(id)
    }

    /// All categories by name.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    pub fn list_categories(&self) -> Result<Vec<TableCategory>> {
        Database::list_categories(self.db.connection())
    }

    /// Stores a new table in `Available` status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category does not exist, and `Validation`
    /// if the number is taken or the capacity falls outside the category.
    pub fn add_table(&self, table: &NewTable) -> Result<TableId> {
        let id = Database::insert_table(self.db.connection(), table, self.clock.now())?;
        log::info!("table {id} '{}' added ({} seats)", table.number, table.capacity);
        Ok(id)
    }

    /// All tables by id.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    pub fn list_tables(&self) -> Result<Vec<Table>> {
        Database::list_tables(self.db.connection())
    }

    /// Fetches a table.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist.
    pub fn get(&self, id: TableId) -> Result<Table> {
        Database::get_table(self.db.connection(), id)?
            .ok_or_else(|| Error::not_found(format!("table {id}")))
    }

    /// Sets a table's status by hand, e.g. to take it out for maintenance.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the table does not exist.
    pub fn set_status(&self, id: TableId, status: TableStatus, actor: Option<i64>) -> Result<()> {
        Database::set_table_status(self.db.connection(), id, status, actor, self.clock.now())?;
        log::info!("table {id} set to {status}");
        Ok(())
    }
}
