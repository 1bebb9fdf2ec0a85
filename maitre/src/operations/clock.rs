//! Source of "now" for booking-time validation.
//!
//! The lifecycle rejects bookings that are not in the future, so tests need
//! to control what "now" is. Production code uses [`SystemClock`].

use chrono::{Local, NaiveDateTime};

/// Something that can tell the current local date and time.
pub trait Clock: Send + Sync {
    /// The current wall-clock time in the restaurant's time zone.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the operating system clock in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use maitre::operations::{Clock, FixedClock};
///
/// let noon = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// assert_eq!(FixedClock(noon).now(), noon);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
