//! Overflow queue for parties that could not get a table.

use chrono::{NaiveDate, NaiveTime};

use crate::database::{commit, Database, NewWaitlistEntry};
use crate::error::{Error, Result};
use crate::ids::{CustomerId, WaitlistId};
use crate::reservation::{PartySize, DEFAULT_DURATION_MINUTES};
use crate::table::TableStatus;
use crate::waitlist::{WaitlistEntry, WaitlistStatus, WaitlistTicket, DEFAULT_WAIT_MINUTES};
use crate::window::truncate_to_minute;

use super::availability::AvailabilityChecker;
use super::clock::{Clock, SystemClock};
use super::lifecycle::SlotOpened;

/// Maintains one ordered queue per requested (date, time) slot.
///
/// Active entries in a queue always hold positions `1..=n` with no gaps.
/// Whenever an entry leaves, the rest of its queue is renumbered inside the
/// same transaction as the status write.
#[derive(Debug)]
pub struct WaitlistQueue<'a, C: Clock = SystemClock> {
    db: &'a mut Database,
    clock: C,
    default_wait_minutes: u32,
}

impl<'a> WaitlistQueue<'a, SystemClock> {
    /// Creates a queue manager that reads the system clock.
    pub fn new(db: &'a mut Database) -> Self {
        Self::with_clock(db, SystemClock)
    }
}

impl<'a, C: Clock> WaitlistQueue<'a, C> {
    /// Creates a queue manager with a custom clock.
    pub fn with_clock(db: &'a mut Database, clock: C) -> Self {
        Self {
            db,
            clock,
            default_wait_minutes: DEFAULT_WAIT_MINUTES,
        }
    }

    /// Sets the estimated wait quoted to new entries.
    #[must_use]
    pub const fn with_default_wait(mut self, minutes: u32) -> Self {
        self.default_wait_minutes = minutes;
        self
    }

    /// Adds a party to the back of the queue for `date` at `time`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the party size is outside 1-20, and
    /// `LockTimeout` or any store error.
    pub fn join(
        &mut self,
        customer_id: CustomerId,
        date: NaiveDate,
        time: NaiveTime,
        party_size: u32,
    ) -> Result<WaitlistTicket> {
        let party_size = PartySize::try_from(party_size)?;
        let time = truncate_to_minute(time);
        let now = self.clock.now();
        let timeout = self.db.busy_timeout();
        let tx = self.db.begin_immediate()?;

        let position = Database::max_active_position(&tx, date, time)? + 1;
        let id = Database::insert_waitlist_entry(
            &tx,
            &NewWaitlistEntry {
                customer_id,
                date,
                time,
                party_size,
                position,
                wait_minutes: self.default_wait_minutes,
                created_at: now,
            },
        )?;

        commit(tx, timeout)?;
        log::info!(
            "waitlist {id}: customer {customer_id} joined {date} {} at position {position}",
            time.format("%H:%M")
        );
        Ok(WaitlistTicket { id, position })
    }

    /// Marks an active entry seated and closes the gap it leaves.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `InvalidTransition` unless
    /// the entry is active.
    pub fn seat(&mut self, id: WaitlistId) -> Result<()> {
        self.leave(id, "seat", WaitlistStatus::Seated)
    }

    /// Takes an active entry out of the queue. The row is kept as
    /// `Expired`; use [`purge`](Self::purge) to delete it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `InvalidTransition` unless
    /// the entry is active.
    pub fn remove(&mut self, id: WaitlistId) -> Result<()> {
        self.leave(id, "remove", WaitlistStatus::Expired)
    }

    /// Marks an active entry expired and closes the gap it leaves.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `InvalidTransition` unless
    /// the entry is active.
    pub fn expire(&mut self, id: WaitlistId) -> Result<()> {
        self.leave(id, "expire", WaitlistStatus::Expired)
    }

    /// Deletes an entry in any status and renumbers its queue.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn purge(&mut self, id: WaitlistId) -> Result<()> {
        let timeout = self.db.busy_timeout();
        let tx = self.db.begin_immediate()?;

        let entry = fetch(&tx, id)?;
        Database::delete_waitlist_entry(&tx, id)?;
        let moved = Database::renumber_active_queue(&tx, entry.date, entry.time)?;

        commit(tx, timeout)?;
        log::info!("waitlist {id}: purged ({moved} position(s) moved up)");
        Ok(())
    }

    /// Updates the estimated wait quoted for an entry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn set_wait_time(&mut self, id: WaitlistId, minutes: u32) -> Result<()> {
        Database::set_wait_minutes(self.db.connection(), id, minutes)?;
        log::debug!("waitlist {id}: wait set to {minutes} minutes");
        Ok(())
    }

    /// Fetches an entry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist.
    pub fn get(&self, id: WaitlistId) -> Result<WaitlistEntry> {
        fetch(self.db.connection(), id)
    }

    /// Every active entry by date, time, then position.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    pub fn active(&self) -> Result<Vec<WaitlistEntry>> {
        Database::active_waitlist(self.db.connection())
    }

    /// A customer's entries in any status.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    pub fn for_customer(&self, customer_id: CustomerId) -> Result<Vec<WaitlistEntry>> {
        Database::waitlist_for_customer(self.db.connection(), customer_id)
    }

    /// Active entries on the slot's date, in queue order, that the freed
    /// table could take: the party fits and the table is free for a default
    /// length stay at the entry's requested time.
    ///
    /// Returns nothing while the table is not `Available`, e.g. when it was
    /// under maintenance as the reservation ended.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the table no longer exists, and any store error.
    pub fn candidates_for(&self, slot: &SlotOpened) -> Result<Vec<WaitlistEntry>> {
        let conn = self.db.connection();
        let table = Database::get_table(conn, slot.table_id)?
            .ok_or_else(|| Error::not_found(format!("table {}", slot.table_id)))?;
        if table.status != TableStatus::Available {
            log::debug!(
                "table {} is {}; no waitlist candidates",
                table.number,
                table.status
            );
            return Ok(Vec::new());
        }

        let mut candidates = Vec::new();
        for entry in Database::active_waitlist_on_date(conn, slot.date)? {
            if table.capacity.seats(entry.party_size)
                && AvailabilityChecker::is_available(
                    conn,
                    table.id,
                    entry.date,
                    entry.time,
                    DEFAULT_DURATION_MINUTES,
                )?
            {
                candidates.push(entry);
            }
        }
        Ok(candidates)
    }

    fn leave(&mut self, id: WaitlistId, action: &'static str, target: WaitlistStatus) -> Result<()> {
        let timeout = self.db.busy_timeout();
        let tx = self.db.begin_immediate()?;

        let entry = fetch(&tx, id)?;
        if !entry.is_active() {
            return Err(Error::InvalidTransition {
                entity: "waitlist entry",
                id: id.value(),
                from: entry.status.to_string(),
                action,
            });
        }

        Database::set_waitlist_status(&tx, id, target)?;
        let moved = Database::renumber_active_queue(&tx, entry.date, entry.time)?;

        commit(tx, timeout)?;
        log::info!(
            "waitlist {id}: {} -> {target} from position {} ({moved} moved up)",
            entry.status,
            entry.position
        );
        Ok(())
    }
}

fn fetch(conn: &rusqlite::Connection, id: WaitlistId) -> Result<WaitlistEntry> {
    Database::get_waitlist_entry(conn, id)?
        .ok_or_else(|| Error::not_found(format!("waitlist entry {id}")))
}
