//! Simple counts over the record store.

use chrono::NaiveDate;
use serde::Serialize;

use crate::database::Database;
use crate::error::Result;
use crate::ids::TableId;
use crate::reservation::Reservation;
use crate::table::Capacity;

/// Reservations held by one table on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableUtilization {
    /// The table.
    pub table_id: TableId,
    /// Its label.
    pub table_number: String,
    /// Its seat count.
    pub capacity: Capacity,
    /// Non-cancelled reservations on the date.
    pub reservations: u32,
}

/// State of the waitlist across all queues.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaitlistSummary {
    /// Active entries.
    pub waiting: u32,
    /// Mean estimated wait of active entries, or `None` if nobody waits.
    pub average_wait_minutes: Option<f64>,
}

/// Read-only report queries.
#[derive(Debug, Clone, Copy)]
pub struct Reports<'a> {
    db: &'a Database,
}

impl<'a> Reports<'a> {
    /// Creates a report reader over `db`.
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Every reservation on `date` by time, in any status.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    pub fn daily(&self, date: NaiveDate) -> Result<Vec<Reservation>> {
        Database::reservations_on_date(self.db.connection(), date)
    }

    /// Per-table count of non-cancelled reservations on `date`.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    pub fn utilization(&self, date: NaiveDate) -> Result<Vec<TableUtilization>> {
        Database::table_utilization(self.db.connection(), date)
    }

    /// Number waiting and their average estimated wait.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    pub fn waitlist(&self) -> Result<WaitlistSummary> {
        Database::waitlist_summary(self.db.connection())
    }
}
