//! Aggregate queries backing the reports.

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::operations::reports::{TableUtilization, WaitlistSummary};

use super::connection::Database;

const WAITLIST_SUMMARY: &str = r"
    SELECT COUNT(*), AVG(wait_minutes)
    FROM waitlist
    WHERE status = 'ACTIVE'
";

impl Database {
    /// Counts non-cancelled reservations per table on `date`, including
    /// tables with none, in table id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn table_utilization(conn: &Connection, date: NaiveDate) -> Result<Vec<TableUtilization>> {
        Self::list_tables(conn)?
            .into_iter()
            .map(|table| {
                let reservations = Self::count_reservations_for_table_on(conn, table.id, date)?;
                Ok(TableUtilization {
                    table_id: table.id,
                    table_number: table.number,
                    capacity: table.capacity,
                    reservations,
                })
            })
            .collect()
    }

    /// Counts active waitlist entries and averages their estimated wait.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn waitlist_summary(conn: &Connection) -> Result<WaitlistSummary> {
        let (waiting, average_wait_minutes) = conn.query_row(WAITLIST_SUMMARY, params![], |row| {
            Ok((row.get::<_, u32>(0)?, row.get::<_, Option<f64>>(1)?))
        })?;
        Ok(WaitlistSummary {
            waiting,
            average_wait_minutes,
        })
    }
}
