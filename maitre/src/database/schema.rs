//! Database schema definitions and SQL constants.

/// Current schema version for the database.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value store for schema version and other bookkeeping.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Capacity bands tables are grouped into.
pub const CREATE_CATEGORIES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS table_categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        min_capacity INTEGER NOT NULL CHECK (min_capacity BETWEEN 1 AND 20),
        max_capacity INTEGER NOT NULL CHECK (max_capacity BETWEEN 1 AND 20),
        description TEXT,
        CHECK (min_capacity <= max_capacity)
    )";

/// Dining tables. Named `dining_tables` to stay clear of the SQL keyword.
pub const CREATE_TABLES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS dining_tables (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        table_number TEXT NOT NULL UNIQUE,
        capacity INTEGER NOT NULL CHECK (capacity BETWEEN 1 AND 20),
        status TEXT NOT NULL,
        category_id INTEGER NOT NULL REFERENCES table_categories(id),
        location TEXT,
        has_window INTEGER NOT NULL DEFAULT 0,
        is_private INTEGER NOT NULL DEFAULT 0,
        last_modified_by INTEGER,
        last_modified_at TEXT NOT NULL
    )";

/// Reservations. Rows are never deleted.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_id INTEGER NOT NULL,
        table_id INTEGER NOT NULL REFERENCES dining_tables(id),
        reservation_date TEXT NOT NULL,
        reservation_time TEXT NOT NULL,
        party_size INTEGER NOT NULL CHECK (party_size BETWEEN 1 AND 20),
        status TEXT NOT NULL,
        duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
        notes TEXT,
        created_at TEXT NOT NULL
    )";

/// Waitlist entries.
pub const CREATE_WAITLIST_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS waitlist (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_id INTEGER NOT NULL,
        requested_date TEXT NOT NULL,
        requested_time TEXT NOT NULL,
        party_size INTEGER NOT NULL CHECK (party_size > 0),
        status TEXT NOT NULL,
        queue_position INTEGER NOT NULL CHECK (queue_position > 0),
        wait_minutes INTEGER NOT NULL CHECK (wait_minutes >= 0),
        created_at TEXT NOT NULL
    )";

/// Speeds up the per-table availability scan.
pub const CREATE_RESERVATION_TABLE_DATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_reservations_table_date ON reservations(table_id, reservation_date)";

/// Speeds up customer history lookups.
pub const CREATE_RESERVATION_CUSTOMER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_customer ON reservations(customer_id)";

/// Active positions are unique within a queue.
pub const CREATE_WAITLIST_POSITION_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_waitlist_active_position
    ON waitlist(requested_date, requested_time, queue_position)
    WHERE status = 'ACTIVE'";

/// Reads the schema version.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// Writes the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
