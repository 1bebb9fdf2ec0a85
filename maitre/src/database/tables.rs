//! Record store operations for tables and table categories.

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::ids::{CategoryId, TableId};
use crate::reservation::PartySize;
use crate::table::{Capacity, NewCategory, NewTable, Table, TableCategory, TableStatus};

use super::codec::{corruption, format_timestamp, is_unique_violation, parse_timestamp};
use super::connection::Database;

const TABLE_COLUMNS: &str = "id, table_number, capacity, status, category_id, location, \
     has_window, is_private, last_modified_by, last_modified_at";

const INSERT_CATEGORY: &str = r"
    INSERT INTO table_categories (name, min_capacity, max_capacity, description)
    VALUES (?, ?, ?, ?)
";

const SELECT_CATEGORY: &str = r"
    SELECT id, name, min_capacity, max_capacity, description
    FROM table_categories
    WHERE id = ?
";

const LIST_CATEGORIES: &str = r"
    SELECT id, name, min_capacity, max_capacity, description
    FROM table_categories
    ORDER BY id
";

const INSERT_TABLE: &str = r"
    INSERT INTO dining_tables
    (table_number, capacity, status, category_id, location, has_window, is_private,
     last_modified_by, last_modified_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE_TABLE_STATUS: &str = r"
    UPDATE dining_tables
    SET status = ?, last_modified_by = ?, last_modified_at = ?
    WHERE id = ?
";

/// A table row before its status and timestamp are decoded.
struct TableRow {
    id: TableId,
    number: String,
    capacity: u32,
    status: String,
    category_id: CategoryId,
    location: Option<String>,
    has_window: bool,
    is_private: bool,
    last_modified_by: Option<i64>,
    last_modified_at: String,
}

impl TableRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            number: row.get(1)?,
            capacity: row.get(2)?,
            status: row.get(3)?,
            category_id: row.get(4)?,
            location: row.get(5)?,
            has_window: row.get(6)?,
            is_private: row.get(7)?,
            last_modified_by: row.get(8)?,
            last_modified_at: row.get(9)?,
        })
    }

    fn decode(self) -> Result<Table> {
        let capacity = Capacity::try_from(self.capacity)
            .map_err(|e| corruption(format!("table {}: {e}", self.id)))?;
        Ok(Table {
            id: self.id,
            number: self.number,
            capacity,
            status: self.status.parse()?,
            category_id: self.category_id,
            location: self.location,
            has_window: self.has_window,
            is_private: self.is_private,
            last_modified_by: self.last_modified_by,
            last_modified_at: parse_timestamp(&self.last_modified_at)?,
        })
    }
}

fn row_to_category(row: &rusqlite::Row<'_>) -> rusqlite::Result<(CategoryId, String, u32, u32, Option<String>)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn decode_category(
    (id, name, min, max, description): (CategoryId, String, u32, u32, Option<String>),
) -> Result<TableCategory> {
    let bound = |value: u32| {
        Capacity::try_from(value).map_err(|e| corruption(format!("category {id}: {e}")))
    };
    Ok(TableCategory {
        id,
        name,
        min_capacity: bound(min)?,
        max_capacity: bound(max)?,
        description,
    })
}

fn collect_tables(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Table>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, TableRow::from_row)?;
    let mut tables = Vec::new();
    for row in rows {
        tables.push(row?.decode()?);
    }
    Ok(tables)
}

impl Database {
    /// Stores a new category.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is already taken.
    pub fn insert_category(conn: &Connection, category: &NewCategory) -> Result<CategoryId> {
        conn.execute(
            INSERT_CATEGORY,
            params![
                category.name,
                category.min_capacity.value(),
                category.max_capacity.value(),
                category.description,
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::Validation {
                    field: "name".into(),
                    message: format!("category '{}' already exists", category.name),
                }
            } else {
                e.into()
            }
        })?;
        Ok(CategoryId::new(conn.last_insert_rowid()))
    }

    /// Fetches a category by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_category(conn: &Connection, id: CategoryId) -> Result<Option<TableCategory>> {
        conn.query_row(SELECT_CATEGORY, [id], row_to_category)
            .optional()?
            .map(decode_category)
            .transpose()
    }

    /// Lists every category in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_categories(conn: &Connection) -> Result<Vec<TableCategory>> {
        let mut stmt = conn.prepare(LIST_CATEGORIES)?;
        let rows = stmt.query_map([], row_to_category)?;
        let mut categories = Vec::new();
        for row in rows {
            categories.push(decode_category(row?)?);
        }
        Ok(categories)
    }

    /// Stores a new table in `Available` status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category does not exist, and a validation
    /// error if the table number is taken or the capacity falls outside the
    /// category's band.
    pub fn insert_table(conn: &Connection, table: &NewTable, now: NaiveDateTime) -> Result<TableId> {
        let category = Self::get_category(conn, table.category_id)?
            .ok_or_else(|| Error::not_found(format!("table category {}", table.category_id)))?;

        if table.capacity < category.min_capacity || table.capacity > category.max_capacity {
            return Err(Error::Validation {
                field: "capacity".into(),
                message: format!(
                    "capacity {} is outside category '{}' ({}-{})",
                    table.capacity, category.name, category.min_capacity, category.max_capacity
                ),
            });
        }

        conn.execute(
            INSERT_TABLE,
            params![
                table.number,
                table.capacity.value(),
                TableStatus::Available.as_str(),
                table.category_id,
                table.location,
                table.has_window,
                table.is_private,
                table.created_by,
                format_timestamp(now),
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::Validation {
                    field: "table_number".into(),
                    message: format!("table number '{}' already exists", table.number),
                }
            } else {
                e.into()
            }
        })?;
        Ok(TableId::new(conn.last_insert_rowid()))
    }

    /// Fetches a table by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row cannot be
    /// decoded.
    pub fn get_table(conn: &Connection, id: TableId) -> Result<Option<Table>> {
        let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_tables WHERE id = ?");
        conn.query_row(&sql, [id], TableRow::from_row)
            .optional()?
            .map(TableRow::decode)
            .transpose()
    }

    /// Lists every table ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_tables(conn: &Connection) -> Result<Vec<Table>> {
        let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_tables ORDER BY id");
        collect_tables(conn, &sql, params![])
    }

    /// Lists `Available` tables that seat `party`, smallest first, ties by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn available_tables(conn: &Connection, party: PartySize) -> Result<Vec<Table>> {
        let sql = format!(
            "SELECT {TABLE_COLUMNS} FROM dining_tables \
             WHERE status = ? AND capacity >= ? \
             ORDER BY capacity, id"
        );
        collect_tables(
            conn,
            &sql,
            params![TableStatus::Available.as_str(), party.value()],
        )
    }

    /// Sets a table's status and stamps who changed it and when.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the table does not exist.
    pub fn set_table_status(
        conn: &Connection,
        id: TableId,
        status: TableStatus,
        modified_by: Option<i64>,
        now: NaiveDateTime,
    ) -> Result<()> {
        let changed = conn.execute(
            UPDATE_TABLE_STATUS,
            params![status.as_str(), modified_by, format_timestamp(now), id],
        )?;
        if changed == 0 {
            return Err(Error::not_found(format!("table {id}")));
        }
        Ok(())
    }
}
