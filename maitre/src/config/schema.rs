//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::reservation::{ReservationStatus, DEFAULT_DURATION_MINUTES};
use crate::waitlist::DEFAULT_WAIT_MINUTES;

/// Lock wait used when `maximum_lock_wait_seconds` is unset.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that partial files and overrides can be
/// layered; the accessor methods fill in the built-in defaults.
///
/// # Examples
///
/// ```
/// use maitre::config::{BookingConfig, Config, InitialStatus};
///
/// let config = Config {
///     booking: Some(BookingConfig {
///         default_duration_minutes: Some(90),
///         initial_status: Some(InitialStatus::Confirmed),
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.default_duration_minutes(), 90);
/// assert_eq!(config.default_wait_minutes(), 120);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Defaults for new reservations.
    pub booking: Option<BookingConfig>,

    /// Defaults for new waitlist entries.
    pub waitlist: Option<WaitlistConfig>,

    /// Maximum time to wait for the database write lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Refuse to create the database implicitly.
    pub disable_autoinit: Option<bool>,
}

/// Booking defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BookingConfig {
    /// Length of a sitting when the request does not say.
    pub default_duration_minutes: Option<u32>,
    /// Status new reservations start in.
    pub initial_status: Option<InitialStatus>,
}

/// Waitlist defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WaitlistConfig {
    /// Estimated wait quoted to new entries.
    pub default_wait_minutes: Option<u32>,
}

/// The statuses a reservation may be created in.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InitialStatus {
    /// Awaiting confirmation.
    Pending,
    /// Confirmed on creation.
    Confirmed,
}

impl From<InitialStatus> for ReservationStatus {
    fn from(status: InitialStatus) -> Self {
        match status {
            InitialStatus::Pending => Self::Pending,
            InitialStatus::Confirmed => Self::Confirmed,
        }
    }
}

impl Config {
    /// Booking duration to use when none is given.
    #[must_use]
    pub fn default_duration_minutes(&self) -> u32 {
        self.booking
            .as_ref()
            .and_then(|b| b.default_duration_minutes)
            .unwrap_or(DEFAULT_DURATION_MINUTES)
    }

    /// Status new reservations start in.
    #[must_use]
    pub fn initial_status(&self) -> ReservationStatus {
        self.booking
            .as_ref()
            .and_then(|b| b.initial_status)
            .map_or(ReservationStatus::Pending, ReservationStatus::from)
    }

    /// Estimated wait for new waitlist entries.
    #[must_use]
    pub fn default_wait_minutes(&self) -> u32 {
        self.waitlist
            .as_ref()
            .and_then(|w| w.default_wait_minutes)
            .unwrap_or(DEFAULT_WAIT_MINUTES)
    }

    /// How long a write waits for another writer.
    #[must_use]
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Whether implicit database creation is turned off.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }
}
