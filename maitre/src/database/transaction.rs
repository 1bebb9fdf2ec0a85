//! Write transactions.
//!
//! Every engine mutation runs inside one `BEGIN IMMEDIATE` transaction so
//! that its checks and writes see a consistent store and concurrent writers
//! serialize. Dropping a [`Transaction`] without committing rolls it back.

use std::time::Duration;

use rusqlite::{ErrorCode, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

impl Database {
    /// Begins an IMMEDIATE transaction, taking the write lock up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if another writer holds the lock for
    /// longer than the busy timeout.
    pub fn begin_immediate(&mut self) -> Result<Transaction<'_>> {
        let timeout = self.busy_timeout();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| lock_error(e, timeout))
    }
}

/// Commits `tx`, reporting lock contention as [`Error::LockTimeout`].
///
/// # Errors
///
/// Returns an error if the commit fails.
pub fn commit(tx: Transaction<'_>, busy_timeout: Duration) -> Result<()> {
    tx.commit().map_err(|e| lock_error(e, busy_timeout))
}

pub(crate) fn lock_error(err: rusqlite::Error, busy_timeout: Duration) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(ref e, _)
            if matches!(e.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) =>
        {
            Error::LockTimeout {
                seconds: busy_timeout.as_secs(),
            }
        }
        other => Error::Database(other),
    }
}
