//! Waitlist entry types.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::ids::{CustomerId, WaitlistId};
use crate::reservation::PartySize;

/// Estimated wait assigned to a new entry unless configured otherwise.
pub const DEFAULT_WAIT_MINUTES: u32 = 120;

/// State of a waitlist entry. Only `Active` entries hold a queue position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaitlistStatus {
    /// Waiting in the queue.
    Active,
    /// Given a table.
    Seated,
    /// Left the queue without being seated.
    Expired,
}

impl WaitlistStatus {
    /// Returns the stored form of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Seated => "SEATED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for WaitlistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaitlistStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "SEATED" => Ok(Self::Seated),
            "EXPIRED" => Ok(Self::Expired),
            _ => Err(Error::UnrecognizedStatus {
                entity: "waitlist",
                value: s.to_string(),
            }),
        }
    }
}

/// A stored waitlist entry.
///
/// A queue is the set of entries requesting the same date and time; positions
/// are numbered within that queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    /// Identity.
    pub id: WaitlistId,
    /// Who is waiting.
    pub customer_id: CustomerId,
    /// Day requested.
    pub date: NaiveDate,
    /// Time requested.
    pub time: NaiveTime,
    /// Number of guests.
    pub party_size: PartySize,
    /// Queue state.
    pub status: WaitlistStatus,
    /// 1-based place in the queue.
    pub position: u32,
    /// Estimated wait quoted to the customer.
    pub wait_minutes: u32,
    /// When the entry joined.
    pub created_at: NaiveDateTime,
}

impl WaitlistEntry {
    /// Returns `true` if the entry is still waiting.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == WaitlistStatus::Active
    }
}

/// What a customer gets back on joining the waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistTicket {
    /// The new entry.
    pub id: WaitlistId,
    /// Its place in the queue.
    pub position: u32,
}
