//! Double-booking checks for a single table.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::ids::TableId;
use crate::reservation::Reservation;
use crate::window::TimeWindow;

/// Decides whether a table is free for a time window.
///
/// A table is free when none of its pending or confirmed reservations on
/// the same date overlap the requested window. Stateless; every call reads
/// the store through the connection it is given, which may be an open
/// transaction.
///
/// # Examples
///
/// ```no_run
/// use chrono::{NaiveDate, NaiveTime};
/// use maitre::database::{Database, DatabaseConfig};
/// use maitre::operations::AvailabilityChecker;
/// use maitre::TableId;
///
/// let db = Database::open(DatabaseConfig::new("/tmp/maitre.db")).unwrap();
/// let free = AvailabilityChecker::is_available(
///     db.connection(),
///     TableId::new(1),
///     NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
///     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     120,
/// )
/// .unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityChecker;

impl AvailabilityChecker {
    /// Returns `true` if the table has no active reservation overlapping
    /// `[time, time + duration_minutes)` on `date`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a zero duration, `NotFound` for an unknown
    /// table, and any store error unchanged.
    pub fn is_available(
        conn: &Connection,
        table_id: TableId,
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: u32,
    ) -> Result<bool> {
        let window = TimeWindow::new(time, duration_minutes)?;
        Ok(Self::conflicts(conn, table_id, date, window)?.is_empty())
    }

    /// Returns the active reservations on the table that overlap `window`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown table, and any store error.
    pub fn conflicts(
        conn: &Connection,
        table_id: TableId,
        date: NaiveDate,
        window: TimeWindow,
    ) -> Result<Vec<Reservation>> {
        if Database::get_table(conn, table_id)?.is_none() {
            return Err(Error::not_found(format!("table {table_id}")));
        }

        let mut overlapping = Vec::new();
        for existing in Database::active_reservations_for_table_on(conn, table_id, date)? {
            if existing.window()?.overlaps(&window) {
                overlapping.push(existing);
            }
        }

        log::debug!(
            "table {table_id} on {date} {window}: {} conflicting reservation(s)",
            overlapping.len()
        );
        Ok(overlapping)
    }
}
