//! Reservation types.
//!
//! This module provides the stored [`Reservation`] record, its
//! [`ReservationStatus`] state machine values, and the [`BookingRequest`]
//! callers hand to the lifecycle to create one.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::ids::{CustomerId, ReservationId, TableId};
use crate::window::{truncate_to_minute, TimeWindow};

/// Default length of a sitting, in minutes.
pub const DEFAULT_DURATION_MINUTES: u32 = 120;

/// Number of guests in a party (1-20).
///
/// # Examples
///
/// ```
/// use maitre::PartySize;
///
/// assert_eq!(PartySize::try_from(6).unwrap().value(), 6);
/// assert!(PartySize::try_from(0).is_err());
/// assert!(PartySize::try_from(21).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartySize(u32);

impl PartySize {
    /// The smallest party accepted.
    pub const MIN: u32 = 1;

    /// The largest party accepted.
    pub const MAX: u32 = 20;

    /// Returns the number of guests.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for PartySize {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::new(
                "party_size",
                format!("must be between {} and {}, got {value}", Self::MIN, Self::MAX),
            ))
        }
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a reservation.
///
/// `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Booked but not yet confirmed.
    Pending,
    /// Confirmed by the restaurant.
    Confirmed,
    /// The party has been and gone.
    Completed,
    /// Called off before it happened.
    Cancelled,
}

impl ReservationStatus {
    /// Returns the stored form of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns `true` if a reservation in this state holds its table.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Returns `true` if a reservation in this state may still be cancelled.
    #[must_use]
    pub const fn can_be_cancelled(self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(Error::UnrecognizedStatus {
                entity: "reservation",
                value: s.to_string(),
            }),
        }
    }
}

/// A stored reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Identity.
    pub id: ReservationId,
    /// Who booked.
    pub customer_id: CustomerId,
    /// The table held.
    pub table_id: TableId,
    /// Day of the sitting.
    pub date: NaiveDate,
    /// Start of the sitting.
    pub time: NaiveTime,
    /// Number of guests.
    pub party_size: PartySize,
    /// Lifecycle state.
    pub status: ReservationStatus,
    /// Length of the sitting.
    pub duration_minutes: u32,
    /// Free-form note from the customer.
    pub notes: Option<String>,
    /// When the reservation was made.
    pub created_at: NaiveDateTime,
}

impl Reservation {
    /// Returns `true` if the reservation holds its table.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Returns `true` if the reservation may still be cancelled.
    #[must_use]
    pub const fn can_be_cancelled(&self) -> bool {
        self.status.can_be_cancelled()
    }

    /// The interval the reservation occupies on its date.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored duration is zero.
    pub fn window(&self) -> Result<TimeWindow, ValidationError> {
        TimeWindow::new(self.time, self.duration_minutes)
    }
}

/// Everything needed to book a table, except the table itself.
///
/// The table is either named by the caller or chosen by best fit.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use maitre::{BookingRequest, CustomerId, ReservationStatus};
///
/// let request = BookingRequest::new(
///     CustomerId::new(1),
///     NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
///     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     4,
/// )
/// .with_duration(90)
/// .confirmed();
///
/// assert_eq!(request.duration_minutes, 90);
/// assert_eq!(request.initial_status, ReservationStatus::Confirmed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Who is booking.
    pub customer_id: CustomerId,
    /// Requested day.
    pub date: NaiveDate,
    /// Requested start, at minute precision.
    pub time: NaiveTime,
    /// Requested party size, validated on create.
    pub party_size: u32,
    /// Length of the sitting.
    pub duration_minutes: u32,
    /// Free-form note.
    pub notes: Option<String>,
    /// Status the reservation starts in.
    pub initial_status: ReservationStatus,
}

impl BookingRequest {
    /// Creates a pending request with the default duration.
    #[must_use]
    pub fn new(customer_id: CustomerId, date: NaiveDate, time: NaiveTime, party_size: u32) -> Self {
        Self {
            customer_id,
            date,
            time: truncate_to_minute(time),
            party_size,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            notes: None,
            initial_status: ReservationStatus::Pending,
        }
    }

    /// Sets the length of the sitting.
    #[must_use]
    pub const fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Attaches a note.
    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.filter(|n| !n.trim().is_empty());
        self
    }

    /// Sets the status the reservation starts in.
    #[must_use]
    pub const fn with_initial_status(mut self, status: ReservationStatus) -> Self {
        self.initial_status = status;
        self
    }

    /// Books straight into `Confirmed`, skipping the pending step.
    #[must_use]
    pub const fn confirmed(self) -> Self {
        self.with_initial_status(ReservationStatus::Confirmed)
    }

    /// When the sitting begins.
    #[must_use]
    pub const fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Checks everything that can be checked without the record store.
    ///
    /// # Errors
    ///
    /// Returns an error if the party size or duration is out of range, the
    /// initial status is not active, or the sitting does not start strictly
    /// after `now`.
    pub fn validate(&self, now: NaiveDateTime) -> Result<(PartySize, TimeWindow), ValidationError> {
        let party = PartySize::try_from(self.party_size)?;
        let window = TimeWindow::new(self.time, self.duration_minutes)?;

        if !self.initial_status.is_active() {
            return Err(ValidationError::new(
                "initial_status",
                format!(
                    "must be PENDING or CONFIRMED, got {}",
                    self.initial_status
                ),
            ));
        }

        if self.starts_at() <= now {
            return Err(ValidationError::new(
                "date",
                format!(
                    "reservation must be in the future ({} is not after {})",
                    self.starts_at().format("%Y-%m-%d %H:%M"),
                    now.format("%Y-%m-%d %H:%M")
                ),
            ));
        }

        Ok((party, window))
    }
}

/// Validation error for domain values built outside the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod proptests;
