//! Best-fit table selection.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

use crate::database::Database;
use crate::error::Result;
use crate::reservation::PartySize;
use crate::table::Table;
use crate::window::TimeWindow;

use super::availability::AvailabilityChecker;

/// What a party needs from a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatingRequest {
    /// Number of guests, validated on use.
    pub party_size: u32,
    /// Day requested.
    pub date: NaiveDate,
    /// Start requested.
    pub time: NaiveTime,
    /// Length of the sitting.
    pub duration_minutes: u32,
}

/// Finds tables that can seat a party, smallest first.
///
/// Candidates are tables in `Available` status with enough seats and no
/// overlapping active reservation. They come back sorted by capacity
/// ascending, ties broken by table id, so taking the first one wastes the
/// fewest seats.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableAllocator;

impl TableAllocator {
    /// Returns the candidate tables for `request`. An empty list is a normal
    /// result meaning "no capacity".
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the party size is outside 1-20 or the
    /// duration is zero, and any store error.
    pub fn find_candidates(conn: &Connection, request: &SeatingRequest) -> Result<Vec<Table>> {
        let party = PartySize::try_from(request.party_size)?;
        let window = TimeWindow::new(request.time, request.duration_minutes)?;

        let mut candidates = Vec::new();
        for table in Database::available_tables(conn, party)? {
            if AvailabilityChecker::conflicts(conn, table.id, request.date, window)?.is_empty() {
                candidates.push(table);
            }
        }

        // Smallest adequate table first, then lowest id.
        candidates.sort_by_key(|t| (t.capacity, t.id));

        log::debug!(
            "{} candidate table(s) for party of {party} on {} at {}",
            candidates.len(),
            request.date,
            request.time.format("%H:%M")
        );
        Ok(candidates)
    }
}
