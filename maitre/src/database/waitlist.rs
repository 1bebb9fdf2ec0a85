//! Record store operations for the waitlist.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::ids::{CustomerId, WaitlistId};
use crate::reservation::PartySize;
use crate::waitlist::{WaitlistEntry, WaitlistStatus};

use super::codec::{
    corruption, format_date, format_time, format_timestamp, parse_date, parse_time,
    parse_timestamp,
};
use super::connection::Database;

const WAITLIST_COLUMNS: &str = "id, customer_id, requested_date, requested_time, party_size, \
     status, queue_position, wait_minutes, created_at";

const INSERT_ENTRY: &str = r"
    INSERT INTO waitlist
    (customer_id, requested_date, requested_time, party_size, status, queue_position,
     wait_minutes, created_at)
    VALUES (?, ?, ?, ?, 'ACTIVE', ?, ?, ?)
";

const MAX_ACTIVE_POSITION: &str = r"
    SELECT COALESCE(MAX(queue_position), 0) FROM waitlist
    WHERE requested_date = ? AND requested_time = ? AND status = 'ACTIVE'
";

const UPDATE_POSITION: &str = "UPDATE waitlist SET queue_position = ? WHERE id = ?";

/// A waitlist entry that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewWaitlistEntry {
    /// Who is waiting.
    pub customer_id: CustomerId,
    /// Day requested.
    pub date: NaiveDate,
    /// Time requested.
    pub time: NaiveTime,
    /// Number of guests.
    pub party_size: PartySize,
    /// Place in the queue.
    pub position: u32,
    /// Estimated wait.
    pub wait_minutes: u32,
    /// When the entry joined.
    pub created_at: NaiveDateTime,
}

struct WaitlistRow {
    id: WaitlistId,
    customer_id: CustomerId,
    date: String,
    time: String,
    party_size: u32,
    status: String,
    position: u32,
    wait_minutes: u32,
    created_at: String,
}

impl WaitlistRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            customer_id: row.get(1)?,
            date: row.get(2)?,
            time: row.get(3)?,
            party_size: row.get(4)?,
            status: row.get(5)?,
            position: row.get(6)?,
            wait_minutes: row.get(7)?,
            created_at: row.get(8)?,
        })
    }

    fn decode(self) -> Result<WaitlistEntry> {
        let party_size = PartySize::try_from(self.party_size)
            .map_err(|e| corruption(format!("waitlist entry {}: {e}", self.id)))?;
        Ok(WaitlistEntry {
            id: self.id,
            customer_id: self.customer_id,
            date: parse_date(&self.date)?,
            time: parse_time(&self.time)?,
            party_size,
            status: self.status.parse()?,
            position: self.position,
            wait_minutes: self.wait_minutes,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

fn collect_entries(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<WaitlistEntry>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, WaitlistRow::from_row)?;
    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?.decode()?);
    }
    Ok(entries)
}

fn select_where(clause: &str) -> String {
    format!("SELECT {WAITLIST_COLUMNS} FROM waitlist WHERE {clause}")
}

impl Database {
    /// Stores an `Active` entry at the given position.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the position is
    /// already held by another active entry in the same queue.
    pub fn insert_waitlist_entry(conn: &Connection, entry: &NewWaitlistEntry) -> Result<WaitlistId> {
        conn.execute(
            INSERT_ENTRY,
            params![
                entry.customer_id,
                format_date(entry.date),
                format_time(entry.time),
                entry.party_size.value(),
                entry.position,
                entry.wait_minutes,
                format_timestamp(entry.created_at),
            ],
        )?;
        Ok(WaitlistId::new(conn.last_insert_rowid()))
    }

    /// Fetches an entry by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_waitlist_entry(conn: &Connection, id: WaitlistId) -> Result<Option<WaitlistEntry>> {
        conn.query_row(&select_where("id = ?"), [id], WaitlistRow::from_row)
            .optional()?
            .map(WaitlistRow::decode)
            .transpose()
    }

    /// Lists every active entry by requested date, time, then position.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn active_waitlist(conn: &Connection) -> Result<Vec<WaitlistEntry>> {
        let sql = select_where(
            "status = 'ACTIVE' ORDER BY requested_date, requested_time, queue_position, id",
        );
        collect_entries(conn, &sql, params![])
    }

    /// Lists the active entries in one queue by position.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn active_waitlist_for_slot(
        conn: &Connection,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Vec<WaitlistEntry>> {
        let sql = select_where(
            "requested_date = ? AND requested_time = ? AND status = 'ACTIVE' \
             ORDER BY queue_position, id",
        );
        collect_entries(conn, &sql, params![format_date(date), format_time(time)])
    }

    /// Lists the active entries for every queue on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn active_waitlist_on_date(conn: &Connection, date: NaiveDate) -> Result<Vec<WaitlistEntry>> {
        let sql = select_where(
            "requested_date = ? AND status = 'ACTIVE' \
             ORDER BY requested_time, queue_position, id",
        );
        collect_entries(conn, &sql, [format_date(date)])
    }

    /// Lists all of a customer's entries, newest request last.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn waitlist_for_customer(
        conn: &Connection,
        customer_id: CustomerId,
    ) -> Result<Vec<WaitlistEntry>> {
        let sql = select_where("customer_id = ? ORDER BY requested_date, requested_time, id");
        collect_entries(conn, &sql, [customer_id])
    }

    /// Highest active position in a queue, or 0 if the queue is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn max_active_position(conn: &Connection, date: NaiveDate, time: NaiveTime) -> Result<u32> {
        Ok(conn.query_row(
            MAX_ACTIVE_POSITION,
            params![format_date(date), format_time(time)],
            |row| row.get(0),
        )?)
    }

    /// Overwrites an entry's status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry does not exist.
    pub fn set_waitlist_status(conn: &Connection, id: WaitlistId, status: WaitlistStatus) -> Result<()> {
        let changed = conn.execute(
            "UPDATE waitlist SET status = ? WHERE id = ?",
            params![status.as_str(), id],
        )?;
        if changed == 0 {
            return Err(Error::not_found(format!("waitlist entry {id}")));
        }
        Ok(())
    }

    /// Overwrites an entry's estimated wait.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry does not exist.
    pub fn set_wait_minutes(conn: &Connection, id: WaitlistId, minutes: u32) -> Result<()> {
        let changed = conn.execute(
            "UPDATE waitlist SET wait_minutes = ? WHERE id = ?",
            params![minutes, id],
        )?;
        if changed == 0 {
            return Err(Error::not_found(format!("waitlist entry {id}")));
        }
        Ok(())
    }

    /// Physically deletes an entry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry does not exist.
    pub fn delete_waitlist_entry(conn: &Connection, id: WaitlistId) -> Result<()> {
        let changed = conn.execute("DELETE FROM waitlist WHERE id = ?", [id])?;
        if changed == 0 {
            return Err(Error::not_found(format!("waitlist entry {id}")));
        }
        Ok(())
    }

    /// Renumbers the active entries of one queue to `1..=n`, keeping their
    /// relative order (prior position, then id). Returns how many positions
    /// changed.
    ///
    /// Positions only ever move down into freed slots and are walked in
    /// ascending order, so the unique active-position index holds after
    /// every single update.
    ///
    /// # Errors
    ///
    /// Returns an error if a query or update fails.
    pub fn renumber_active_queue(conn: &Connection, date: NaiveDate, time: NaiveTime) -> Result<usize> {
        let entries = Self::active_waitlist_for_slot(conn, date, time)?;
        let mut stmt = conn.prepare(UPDATE_POSITION)?;
        let mut changed = 0;
        for (expected, entry) in (1u32..).zip(&entries) {
            if entry.position != expected {
                stmt.execute(params![expected, entry.id])?;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, test_now};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
    }

    fn at(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn new_entry(customer: i64, time: NaiveTime, position: u32) -> NewWaitlistEntry {
        NewWaitlistEntry {
            customer_id: CustomerId::new(customer),
            date: date(),
            time,
            party_size: PartySize::try_from(2).unwrap(),
            position,
            wait_minutes: 120,
            created_at: test_now(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let db = create_test_database();
        let conn = db.connection();
        let id = Database::insert_waitlist_entry(conn, &new_entry(4, at(19), 1)).unwrap();

        let entry = Database::get_waitlist_entry(conn, id).unwrap().unwrap();
        assert_eq!(entry.customer_id, CustomerId::new(4));
        assert_eq!(entry.status, WaitlistStatus::Active);
        assert_eq!(entry.position, 1);
        assert_eq!(entry.wait_minutes, 120);
        assert_eq!(entry.time, at(19));
    }

    #[test]
    fn test_max_position_per_slot() {
        let db = create_test_database();
        let conn = db.connection();
        assert_eq!(Database::max_active_position(conn, date(), at(19)).unwrap(), 0);

        Database::insert_waitlist_entry(conn, &new_entry(1, at(19), 1)).unwrap();
        Database::insert_waitlist_entry(conn, &new_entry(2, at(19), 2)).unwrap();
        Database::insert_waitlist_entry(conn, &new_entry(3, at(20), 1)).unwrap();

        assert_eq!(Database::max_active_position(conn, date(), at(19)).unwrap(), 2);
        assert_eq!(Database::max_active_position(conn, date(), at(20)).unwrap(), 1);
    }

    #[test]
    fn test_duplicate_active_position_rejected() {
        let db = create_test_database();
        let conn = db.connection();
        Database::insert_waitlist_entry(conn, &new_entry(1, at(19), 1)).unwrap();
        assert!(Database::insert_waitlist_entry(conn, &new_entry(2, at(19), 1)).is_err());
    }

    #[test]
    fn test_renumber_closes_gaps_in_order() {
        let db = create_test_database();
        let conn = db.connection();
        let a = Database::insert_waitlist_entry(conn, &new_entry(1, at(19), 1)).unwrap();
        let b = Database::insert_waitlist_entry(conn, &new_entry(2, at(19), 2)).unwrap();
        let c = Database::insert_waitlist_entry(conn, &new_entry(3, at(19), 3)).unwrap();
        let d = Database::insert_waitlist_entry(conn, &new_entry(4, at(19), 4)).unwrap();

        Database::set_waitlist_status(conn, a, WaitlistStatus::Seated).unwrap();
        Database::set_waitlist_status(conn, c, WaitlistStatus::Expired).unwrap();
        let changed = Database::renumber_active_queue(conn, date(), at(19)).unwrap();
        assert_eq!(changed, 2);

        let queue: Vec<(WaitlistId, u32)> = Database::active_waitlist_for_slot(conn, date(), at(19))
            .unwrap()
            .into_iter()
            .map(|e| (e.id, e.position))
            .collect();
        assert_eq!(queue, vec![(b, 1), (d, 2)]);

        // Inactive rows keep their last position
        let seated = Database::get_waitlist_entry(conn, a).unwrap().unwrap();
        assert_eq!(seated.position, 1);
    }

    #[test]
    fn test_renumber_leaves_other_slots_alone() {
        let db = create_test_database();
        let conn = db.connection();
        let a = Database::insert_waitlist_entry(conn, &new_entry(1, at(19), 1)).unwrap();
        Database::insert_waitlist_entry(conn, &new_entry(2, at(19), 2)).unwrap();
        Database::insert_waitlist_entry(conn, &new_entry(3, at(20), 1)).unwrap();
        let other = Database::insert_waitlist_entry(conn, &new_entry(4, at(20), 2)).unwrap();

        Database::delete_waitlist_entry(conn, a).unwrap();
        Database::renumber_active_queue(conn, date(), at(19)).unwrap();

        let untouched = Database::get_waitlist_entry(conn, other).unwrap().unwrap();
        assert_eq!(untouched.position, 2);
    }

    #[test]
    fn test_set_wait_and_delete_missing() {
        let db = create_test_database();
        let conn = db.connection();
        let id = Database::insert_waitlist_entry(conn, &new_entry(1, at(19), 1)).unwrap();
        Database::set_wait_minutes(conn, id, 45).unwrap();
        assert_eq!(
            Database::get_waitlist_entry(conn, id).unwrap().unwrap().wait_minutes,
            45
        );

        let missing = WaitlistId::new(999);
        assert!(matches!(
            Database::set_wait_minutes(conn, missing, 5),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            Database::delete_waitlist_entry(conn, missing),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_customer_and_date_listings() {
        let db = create_test_database();
        let conn = db.connection();
        Database::insert_waitlist_entry(conn, &new_entry(1, at(20), 1)).unwrap();
        Database::insert_waitlist_entry(conn, &new_entry(1, at(19), 1)).unwrap();
        Database::insert_waitlist_entry(conn, &new_entry(2, at(19), 2)).unwrap();

        let mine = Database::waitlist_for_customer(conn, CustomerId::new(1)).unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].time, at(19));

        let on_date = Database::active_waitlist_on_date(conn, date()).unwrap();
        let order: Vec<(u32, u32)> = on_date
            .iter()
            .map(|e| (chrono::Timelike::hour(&e.time), e.position))
            .collect();
        assert_eq!(order, vec![(19, 1), (19, 2), (20, 1)]);
    }
}
