//! Record store operations for reservations.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::ids::{CustomerId, ReservationId, TableId};
use crate::reservation::{BookingRequest, PartySize, Reservation, ReservationStatus};

use super::codec::{
    corruption, format_date, format_time, format_timestamp, parse_date, parse_time,
    parse_timestamp,
};
use super::connection::Database;

const RESERVATION_COLUMNS: &str = "id, customer_id, table_id, reservation_date, \
     reservation_time, party_size, status, duration_minutes, notes, created_at";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (customer_id, table_id, reservation_date, reservation_time, party_size, status,
     duration_minutes, notes, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE_RESERVATION_STATUS: &str = "UPDATE reservations SET status = ? WHERE id = ?";

const COUNT_FOR_TABLE_ON_DATE: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE table_id = ? AND reservation_date = ? AND status != 'CANCELLED'
";

/// A reservation row before its text columns are decoded.
struct ReservationRow {
    id: ReservationId,
    customer_id: CustomerId,
    table_id: TableId,
    date: String,
    time: String,
    party_size: u32,
    status: String,
    duration_minutes: u32,
    notes: Option<String>,
    created_at: String,
}

impl ReservationRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            customer_id: row.get(1)?,
            table_id: row.get(2)?,
            date: row.get(3)?,
            time: row.get(4)?,
            party_size: row.get(5)?,
            status: row.get(6)?,
            duration_minutes: row.get(7)?,
            notes: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    fn decode(self) -> Result<Reservation> {
        let party_size = PartySize::try_from(self.party_size)
            .map_err(|e| corruption(format!("reservation {}: {e}", self.id)))?;
        Ok(Reservation {
            id: self.id,
            customer_id: self.customer_id,
            table_id: self.table_id,
            date: parse_date(&self.date)?,
            time: parse_time(&self.time)?,
            party_size,
            status: self.status.parse()?,
            duration_minutes: self.duration_minutes,
            notes: self.notes,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

fn collect_reservations(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, ReservationRow::from_row)?;
    let mut reservations = Vec::new();
    for row in rows {
        reservations.push(row?.decode()?);
    }
    Ok(reservations)
}

fn select_where(clause: &str) -> String {
    format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE {clause}")
}

impl Database {
    /// Stores a reservation for `table_id` in the request's initial status.
    ///
    /// The caller is responsible for having checked availability within the
    /// same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_reservation(
        conn: &Connection,
        table_id: TableId,
        request: &BookingRequest,
        created_at: NaiveDateTime,
    ) -> Result<ReservationId> {
        conn.execute(
            INSERT_RESERVATION,
            params![
                request.customer_id,
                table_id,
                format_date(request.date),
                format_time(request.time),
                request.party_size,
                request.initial_status.as_str(),
                request.duration_minutes,
                request.notes,
                format_timestamp(created_at),
            ],
        )?;
        Ok(ReservationId::new(conn.last_insert_rowid()))
    }

    /// Fetches a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        conn.query_row(&select_where("id = ?"), [id], ReservationRow::from_row)
            .optional()?
            .map(ReservationRow::decode)
            .transpose()
    }

    /// Lists a customer's reservations by date and time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn reservations_for_customer(
        conn: &Connection,
        customer_id: CustomerId,
    ) -> Result<Vec<Reservation>> {
        let sql = select_where(
            "customer_id = ? ORDER BY reservation_date, reservation_time, id",
        );
        collect_reservations(conn, &sql, [customer_id])
    }

    /// Lists pending and confirmed reservations from `today` onwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn active_reservations(conn: &Connection, today: NaiveDate) -> Result<Vec<Reservation>> {
        let sql = select_where(
            "status IN ('PENDING', 'CONFIRMED') AND reservation_date >= ? \
             ORDER BY reservation_date, reservation_time, id",
        );
        collect_reservations(conn, &sql, [format_date(today)])
    }

    /// Lists every reservation on `date` by time, then table.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn reservations_on_date(conn: &Connection, date: NaiveDate) -> Result<Vec<Reservation>> {
        let sql = select_where("reservation_date = ? ORDER BY reservation_time, table_id, id");
        collect_reservations(conn, &sql, [format_date(date)])
    }

    /// Lists the pending and confirmed reservations holding `table_id` on
    /// `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn active_reservations_for_table_on(
        conn: &Connection,
        table_id: TableId,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        let sql = select_where(
            "table_id = ? AND reservation_date = ? AND status IN ('PENDING', 'CONFIRMED') \
             ORDER BY reservation_time, id",
        );
        collect_reservations(conn, &sql, params![table_id, format_date(date)])
    }

    /// Counts the non-cancelled reservations for a table on a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_reservations_for_table_on(
        conn: &Connection,
        table_id: TableId,
        date: NaiveDate,
    ) -> Result<u32> {
        Ok(conn.query_row(
            COUNT_FOR_TABLE_ON_DATE,
            params![table_id, format_date(date)],
            |row| row.get(0),
        )?)
    }

    /// Overwrites a reservation's status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the reservation does not exist.
    pub fn set_reservation_status(
        conn: &Connection,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<()> {
        let changed = conn.execute(UPDATE_RESERVATION_STATUS, params![status.as_str(), id])?;
        if changed == 0 {
            return Err(Error::not_found(format!("reservation {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, insert_test_table, test_now};
    use chrono::NaiveTime;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, day).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn request(customer: i64, day: u32, time: NaiveTime) -> BookingRequest {
        BookingRequest::new(CustomerId::new(customer), date(day), time, 2)
    }

    #[test]
    fn test_insert_and_get() {
        let db = create_test_database();
        let conn = db.connection();
        let table = insert_test_table(conn, "T1", 4);

        let req = request(5, 1, at(18, 0))
            .with_duration(90)
            .with_notes(Some("window please".into()));
        let id = Database::insert_reservation(conn, table, &req, test_now()).unwrap();

        let stored = Database::get_reservation(conn, id).unwrap().unwrap();
        assert_eq!(stored.customer_id, CustomerId::new(5));
        assert_eq!(stored.table_id, table);
        assert_eq!(stored.date, date(1));
        assert_eq!(stored.time, at(18, 0));
        assert_eq!(stored.duration_minutes, 90);
        assert_eq!(stored.status, ReservationStatus::Pending);
        assert_eq!(stored.notes.as_deref(), Some("window please"));
        assert_eq!(stored.created_at, test_now());
    }

    #[test]
    fn test_stored_text_formats() {
        let db = create_test_database();
        let conn = db.connection();
        let table = insert_test_table(conn, "T1", 4);
        Database::insert_reservation(conn, table, &request(1, 2, at(7, 5)), test_now()).unwrap();

        let (d, t): (String, String) = conn
            .query_row(
                "SELECT reservation_date, reservation_time FROM reservations",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(d, "2030-01-02");
        assert_eq!(t, "07:05");
    }

    #[test]
    fn test_queries_order_and_filter() {
        let db = create_test_database();
        let conn = db.connection();
        let t1 = insert_test_table(conn, "T1", 4);
        let t2 = insert_test_table(conn, "T2", 4);

        let late = Database::insert_reservation(conn, t1, &request(1, 3, at(20, 0)), test_now())
            .unwrap();
        let early = Database::insert_reservation(conn, t2, &request(1, 3, at(12, 0)), test_now())
            .unwrap();
        let other = Database::insert_reservation(conn, t1, &request(2, 4, at(19, 0)), test_now())
            .unwrap();
        let past = Database::insert_reservation(conn, t1, &request(1, 1, at(19, 0)), test_now())
            .unwrap();

        let ids = |list: Vec<Reservation>| list.into_iter().map(|r| r.id).collect::<Vec<_>>();

        assert_eq!(
            ids(Database::reservations_for_customer(conn, CustomerId::new(1)).unwrap()),
            vec![past, early, late]
        );
        assert_eq!(
            ids(Database::reservations_on_date(conn, date(3)).unwrap()),
            vec![early, late]
        );

        Database::set_reservation_status(conn, early, ReservationStatus::Cancelled).unwrap();
        assert_eq!(
            ids(Database::active_reservations(conn, date(2)).unwrap()),
            vec![late, other]
        );
        assert_eq!(
            ids(Database::active_reservations_for_table_on(conn, t1, date(3)).unwrap()),
            vec![late]
        );
    }

    #[test]
    fn test_count_excludes_cancelled() {
        let db = create_test_database();
        let conn = db.connection();
        let table = insert_test_table(conn, "T1", 4);

        let a = Database::insert_reservation(conn, table, &request(1, 1, at(12, 0)), test_now())
            .unwrap();
        let b = Database::insert_reservation(conn, table, &request(2, 1, at(18, 0)), test_now())
            .unwrap();
        Database::insert_reservation(conn, table, &request(3, 2, at(18, 0)), test_now()).unwrap();

        Database::set_reservation_status(conn, a, ReservationStatus::Completed).unwrap();
        Database::set_reservation_status(conn, b, ReservationStatus::Cancelled).unwrap();

        assert_eq!(
            Database::count_reservations_for_table_on(conn, table, date(1)).unwrap(),
            1
        );
    }

    #[test]
    fn test_set_status_missing() {
        let db = create_test_database();
        let err = Database::set_reservation_status(
            db.connection(),
            ReservationId::new(1),
            ReservationStatus::Confirmed,
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_unrecognized_status_surfaces() {
        let db = create_test_database();
        let conn = db.connection();
        let table = insert_test_table(conn, "T1", 4);
        let id = Database::insert_reservation(conn, table, &request(1, 1, at(12, 0)), test_now())
            .unwrap();
        conn.execute("UPDATE reservations SET status = 'NO_SHOW'", [])
            .unwrap();

        let err = Database::get_reservation(conn, id).unwrap_err();
        assert!(matches!(
            err,
            Error::UnrecognizedStatus { entity: "reservation", ref value } if value == "NO_SHOW"
        ));
    }
}
