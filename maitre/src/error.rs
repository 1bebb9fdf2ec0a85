//! Error types for the maitre library.
//!
//! Every fallible operation in the library returns [`Result`], whose error
//! type is the single [`Error`] enum below. [`Error::kind`] collapses the
//! variants into the coarse categories callers usually branch on.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a maitre error.
///
/// # Examples
///
/// ```
/// use maitre::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(120)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the maitre library.
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed validation before anything was written.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested table is already committed for an overlapping window.
    #[error("booking conflict: {details}")]
    Conflict {
        /// Details about the conflict.
        details: String,
    },

    /// A status change was requested that the current state does not allow.
    #[error("cannot {action} {entity} {id}: current status is {from}")]
    InvalidTransition {
        /// The kind of record ("reservation", "waitlist entry").
        entity: &'static str,
        /// The record's identifier.
        id: i64,
        /// The status the record currently has.
        from: String,
        /// The attempted action ("confirm", "cancel", ...).
        action: &'static str,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A database lock could not be acquired within the busy timeout.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// A stored status value does not name any known status.
    #[error("unrecognized {entity} status '{value}'")]
    UnrecognizedStatus {
        /// The kind of status ("table", "reservation", "waitlist").
        entity: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// A stored value could not be decoded.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The schema version this client understands.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// The offending key, dotted for nested sections.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input; nothing was written.
    Validation,
    /// The table is already booked for an overlapping window.
    Conflict,
    /// The record's current status forbids the requested change.
    InvalidTransition,
    /// A referenced record does not exist.
    NotFound,
    /// The record store failed or holds unreadable data.
    Persistence,
    /// Configuration could not be loaded or is invalid.
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Conflict => write!(f, "conflict"),
            Self::InvalidTransition => write!(f, "invalid transition"),
            Self::NotFound => write!(f, "not found"),
            Self::Persistence => write!(f, "persistence"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}

impl Error {
    /// Returns the category this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use maitre::{Error, ErrorKind};
    ///
    /// let err = Error::LockTimeout { seconds: 5 };
    /// assert_eq!(err.kind(), ErrorKind::Persistence);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Database(_)
            | Self::LockTimeout { .. }
            | Self::UnrecognizedStatus { .. }
            | Self::DatabaseCorruption { .. }
            | Self::UnsupportedSchemaVersion { .. }
            | Self::Io(_) => ErrorKind::Persistence,
            Self::Configuration(_)
            | Self::InvalidConfig { .. }
            | Self::InvalidPath { .. } => ErrorKind::Configuration,
        }
    }

    pub(crate) fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}
