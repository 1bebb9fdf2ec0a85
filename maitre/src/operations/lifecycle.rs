//! Reservation creation and status transitions.
//!
//! Every mutating call runs in a single IMMEDIATE transaction: the
//! availability check, the reservation write, and the table status write
//! commit together or not at all.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Connection;
use serde::Serialize;

use crate::database::{commit, Database};
use crate::error::{Error, Result};
use crate::ids::{CategoryId, CustomerId, ReservationId, TableId};
use crate::reservation::{BookingRequest, Reservation, ReservationStatus};
use crate::table::{Capacity, Table, TableStatus};

use super::allocator::{SeatingRequest, TableAllocator};
use super::availability::AvailabilityChecker;
use super::clock::{Clock, SystemClock};

/// Result of asking for the best-fitting table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// A table was found and the reservation stored.
    Booked {
        /// The new reservation.
        reservation_id: ReservationId,
        /// The table it holds, as of the booking.
        table: Table,
    },
    /// No table can seat the party in that window. Nothing was written;
    /// the caller may offer the waitlist instead.
    NoCapacity,
}

/// A table released by a completed or cancelled reservation.
///
/// Callers can hand this to
/// [`WaitlistQueue::candidates_for`](super::WaitlistQueue::candidates_for)
/// to see who could take the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotOpened {
    /// The reservation that ended.
    pub reservation_id: ReservationId,
    /// The table released.
    pub table_id: TableId,
    /// Its seat count.
    pub capacity: Capacity,
    /// Its category.
    pub category_id: CategoryId,
    /// Date of the released booking.
    pub date: NaiveDate,
    /// Start of the released booking.
    pub time: NaiveTime,
}

/// Drives reservations through Pending, Confirmed, Completed, and Cancelled
/// while keeping table status in step.
///
/// # Type Parameters
///
/// * `C` - Where "now" comes from (defaults to [`SystemClock`])
///
/// # Examples
///
/// ```no_run
/// use chrono::{NaiveDate, NaiveTime};
/// use maitre::database::{Database, DatabaseConfig};
/// use maitre::operations::{BookingOutcome, ReservationLifecycle};
/// use maitre::{BookingRequest, CustomerId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/maitre.db")).unwrap();
/// let mut lifecycle = ReservationLifecycle::new(&mut db);
///
/// let request = BookingRequest::new(
///     CustomerId::new(1),
///     NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
///     NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
///     4,
/// );
/// match lifecycle.book_best_fit(&request).unwrap() {
///     BookingOutcome::Booked { reservation_id, table } => {
///         println!("reservation {reservation_id} at table {}", table.number);
///     }
///     BookingOutcome::NoCapacity => println!("fully booked"),
/// }
/// ```
#[derive(Debug)]
pub struct ReservationLifecycle<'a, C: Clock = SystemClock> {
    db: &'a mut Database,
    clock: C,
}

impl<'a> ReservationLifecycle<'a, SystemClock> {
    /// Creates a lifecycle that reads the system clock.
    pub fn new(db: &'a mut Database) -> Self {
        Self {
            db,
            clock: SystemClock,
        }
    }
}

impl<'a, C: Clock> ReservationLifecycle<'a, C> {
    /// Creates a lifecycle with a custom clock.
    pub fn with_clock(db: &'a mut Database, clock: C) -> Self {
        Self { db, clock }
    }

    /// Books `table_id` for the request.
    ///
    /// # Errors
    ///
    /// - `Validation` if the start is not after now, the party size is out of
    ///   range or exceeds the table's capacity, or the duration is zero
    /// - `NotFound` if the table does not exist
    /// - `Conflict` if an active reservation overlaps the window or the
    ///   table is under maintenance
    /// - `LockTimeout` if another writer holds the store too long
    pub fn create(&mut self, table_id: TableId, request: &BookingRequest) -> Result<ReservationId> {
        let now = self.clock.now();
        let timeout = self.db.busy_timeout();
        let tx = self.db.begin_immediate()?;

        let id = create_in(&tx, table_id, request, now)?;

        commit(tx, timeout)?;
        Ok(id)
    }

    /// Books the smallest free table that seats the party.
    ///
    /// The candidate search and the booking share one transaction, so the
    /// chosen table cannot be taken in between.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`create`](Self::create), except that
    /// running out of tables yields [`BookingOutcome::NoCapacity`].
    pub fn book_best_fit(&mut self, request: &BookingRequest) -> Result<BookingOutcome> {
        let now = self.clock.now();
        request.validate(now)?;

        let timeout = self.db.busy_timeout();
        let tx = self.db.begin_immediate()?;

        let seating = SeatingRequest {
            party_size: request.party_size,
            date: request.date,
            time: request.time,
            duration_minutes: request.duration_minutes,
        };
        let Some(mut table) = TableAllocator::find_candidates(&tx, &seating)?.into_iter().next()
        else {
            log::info!(
                "no table for party of {} on {} at {}",
                request.party_size,
                request.date,
                request.time.format("%H:%M")
            );
            return Ok(BookingOutcome::NoCapacity);
        };

        let reservation_id = create_in(&tx, table.id, request, now)?;
        commit(tx, timeout)?;

        table.status = TableStatus::Reserved;
        table.last_modified_by = Some(request.customer_id.value());
        table.last_modified_at = now;
        Ok(BookingOutcome::Booked {
            reservation_id,
            table,
        })
    }

    /// Pending to Confirmed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `InvalidTransition` unless
    /// the reservation is pending.
    pub fn confirm(&mut self, id: ReservationId) -> Result<()> {
        self.transition(id, "confirm", ReservationStatus::Confirmed, |status| {
            status == ReservationStatus::Pending
        })?;
        Ok(())
    }

    /// Confirmed to Completed. Frees the table.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `InvalidTransition` unless
    /// the reservation is confirmed.
    pub fn complete(&mut self, id: ReservationId) -> Result<SlotOpened> {
        self.transition(id, "complete", ReservationStatus::Completed, |status| {
            status == ReservationStatus::Confirmed
        })
    }

    /// Pending or Confirmed to Cancelled. Frees the table.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `InvalidTransition` if the
    /// reservation is already completed or cancelled.
    pub fn cancel(&mut self, id: ReservationId) -> Result<SlotOpened> {
        self.transition(
            id,
            "cancel",
            ReservationStatus::Cancelled,
            ReservationStatus::can_be_cancelled,
        )
    }

    /// Fetches a reservation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist.
    pub fn get(&self, id: ReservationId) -> Result<Reservation> {
        Database::get_reservation(self.db.connection(), id)?
            .ok_or_else(|| Error::not_found(format!("reservation {id}")))
    }

    /// A customer's reservations by date and time.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    pub fn for_customer(&self, customer_id: CustomerId) -> Result<Vec<Reservation>> {
        Database::reservations_for_customer(self.db.connection(), customer_id)
    }

    /// Pending and confirmed reservations from today onwards.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    pub fn active(&self) -> Result<Vec<Reservation>> {
        Database::active_reservations(self.db.connection(), self.clock.now().date())
    }

    /// Every reservation on `date` by time.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    pub fn on_date(&self, date: NaiveDate) -> Result<Vec<Reservation>> {
        Database::reservations_on_date(self.db.connection(), date)
    }

    fn transition(
        &mut self,
        id: ReservationId,
        action: &'static str,
        target: ReservationStatus,
        allowed: impl Fn(ReservationStatus) -> bool,
    ) -> Result<SlotOpened> {
        let now = self.clock.now();
        let timeout = self.db.busy_timeout();
        let tx = self.db.begin_immediate()?;

        let reservation = Database::get_reservation(&tx, id)?
            .ok_or_else(|| Error::not_found(format!("reservation {id}")))?;
        if !allowed(reservation.status) {
            return Err(Error::InvalidTransition {
                entity: "reservation",
                id: id.value(),
                from: reservation.status.to_string(),
                action,
            });
        }

        Database::set_reservation_status(&tx, id, target)?;
        let table = if target.is_active() {
            Database::get_table(&tx, reservation.table_id)?
        } else {
            Some(release_table(&tx, reservation.table_id, now)?)
        }
        .ok_or_else(|| Error::not_found(format!("table {}", reservation.table_id)))?;

        commit(tx, timeout)?;
        log::info!(
            "reservation {id}: {} -> {target} (table {})",
            reservation.status,
            table.number
        );

        Ok(SlotOpened {
            reservation_id: id,
            table_id: table.id,
            capacity: table.capacity,
            category_id: table.category_id,
            date: reservation.date,
            time: reservation.time,
        })
    }
}

/// Validates, checks availability, inserts, and marks the table reserved,
/// all on the caller's transaction.
fn create_in(
    conn: &Connection,
    table_id: TableId,
    request: &BookingRequest,
    now: NaiveDateTime,
) -> Result<ReservationId> {
    let (party, window) = request.validate(now)?;

    let table = Database::get_table(conn, table_id)?
        .ok_or_else(|| Error::not_found(format!("table {table_id}")))?;

    if !table.capacity.seats(party) {
        return Err(Error::Validation {
            field: "party_size".into(),
            message: format!(
                "party of {party} exceeds capacity {} of table {}",
                table.capacity, table.number
            ),
        });
    }

    if table.status == TableStatus::Maintenance {
        return Err(Error::Conflict {
            details: format!("table {} is under maintenance", table.number),
        });
    }

    let conflicts = AvailabilityChecker::conflicts(conn, table_id, request.date, window)?;
    if let Some(existing) = conflicts.first() {
        return Err(Error::Conflict {
            details: format!(
                "table {} is held by reservation {} on {} from {} for {} minutes",
                table.number,
                existing.id,
                existing.date,
                existing.time.format("%H:%M"),
                existing.duration_minutes
            ),
        });
    }

    let id = Database::insert_reservation(conn, table_id, request, now)?;
    Database::set_table_status(
        conn,
        table_id,
        TableStatus::Reserved,
        Some(request.customer_id.value()),
        now,
    )?;

    log::info!(
        "reservation {id} created for table {} on {} {window} ({})",
        table.number,
        request.date,
        request.initial_status
    );
    Ok(id)
}

/// Puts a held table back into service. Tables a manager has placed under
/// maintenance stay there.
///
/// Other active reservations on the table do not keep it `Reserved`; new
/// bookings are still refused by the window check in [`create_in`].
fn release_table(conn: &Connection, table_id: TableId, now: NaiveDateTime) -> Result<Table> {
    let mut table = Database::get_table(conn, table_id)?
        .ok_or_else(|| Error::not_found(format!("table {table_id}")))?;

    if matches!(table.status, TableStatus::Reserved | TableStatus::Occupied) {
        Database::set_table_status(conn, table_id, TableStatus::Available, None, now)?;
        table.status = TableStatus::Available;
        table.last_modified_by = None;
        table.last_modified_at = now;
    }
    Ok(table)
}
