//! Dining tables and table categories.
//!
//! A [`Table`] has a fixed [`Capacity`] and a [`TableStatus`] that only the
//! reservation lifecycle and explicit manager actions change.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::ids::{CategoryId, TableId};
use crate::reservation::{PartySize, ValidationError};

/// Number of seats at a table (1-20).
///
/// # Examples
///
/// ```
/// use maitre::Capacity;
///
/// let capacity = Capacity::try_from(4).unwrap();
/// assert_eq!(capacity.value(), 4);
///
/// assert!(Capacity::try_from(0).is_err());
/// assert!(Capacity::try_from(21).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capacity(u32);

impl Capacity {
    /// The smallest table the restaurant has.
    pub const MIN: u32 = 1;

    /// The largest table the restaurant has.
    pub const MAX: u32 = 20;

    /// Returns the number of seats.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns `true` if a party of the given size fits at this table.
    ///
    /// # Examples
    ///
    /// ```
    /// use maitre::{Capacity, PartySize};
    ///
    /// let four = Capacity::try_from(4).unwrap();
    /// assert!(four.seats(PartySize::try_from(4).unwrap()));
    /// assert!(!four.seats(PartySize::try_from(5).unwrap()));
    /// ```
    #[must_use]
    pub const fn seats(self, party: PartySize) -> bool {
        party.value() <= self.0
    }
}

impl TryFrom<u32> for Capacity {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::new(
                "capacity",
                format!("must be between {} and {}, got {value}", Self::MIN, Self::MAX),
            ))
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operational state of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    /// Free to be booked.
    Available,
    /// Guests are seated.
    Occupied,
    /// Held by an active reservation.
    Reserved,
    /// Taken out of service by a manager.
    Maintenance,
}

impl TableStatus {
    /// Returns the stored form of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Occupied => "OCCUPIED",
            Self::Reserved => "RESERVED",
            Self::Maintenance => "MAINTENANCE",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableStatus {
    type Err = Error;

    /// Parses a status case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognizedStatus`] for anything but the four known
    /// statuses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" => Ok(Self::Available),
            "OCCUPIED" => Ok(Self::Occupied),
            "RESERVED" => Ok(Self::Reserved),
            "MAINTENANCE" => Ok(Self::Maintenance),
            _ => Err(Error::UnrecognizedStatus {
                entity: "table",
                value: s.to_string(),
            }),
        }
    }
}

/// A named capacity band that tables are grouped into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCategory {
    /// Identity.
    pub id: CategoryId,
    /// Unique display name ("Booth", "Patio").
    pub name: String,
    /// Smallest table capacity in the band.
    pub min_capacity: Capacity,
    /// Largest table capacity in the band.
    pub max_capacity: Capacity,
    /// Free-form description.
    pub description: Option<String>,
}

/// A category that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Unique display name.
    pub name: String,
    /// Smallest table capacity in the band.
    pub min_capacity: Capacity,
    /// Largest table capacity in the band.
    pub max_capacity: Capacity,
    /// Free-form description.
    pub description: Option<String>,
}

impl NewCategory {
    /// Validates and creates a new category.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or either capacity bound is out
    /// of range, or if `min > max`.
    ///
    /// # Examples
    ///
    /// ```
    /// use maitre::NewCategory;
    ///
    /// assert!(NewCategory::new("Booth", 2, 6, None).is_ok());
    /// assert!(NewCategory::new("Booth", 6, 2, None).is_err());
    /// assert!(NewCategory::new("  ", 2, 6, None).is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        min_capacity: u32,
        max_capacity: u32,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = non_blank("name", name.into())?;
        let min_capacity = Capacity::try_from(min_capacity)
            .map_err(|e| ValidationError::new("min_capacity", e.message))?;
        let max_capacity = Capacity::try_from(max_capacity)
            .map_err(|e| ValidationError::new("max_capacity", e.message))?;
        if min_capacity > max_capacity {
            return Err(ValidationError::new(
                "min_capacity",
                format!("must not exceed max_capacity ({min_capacity} > {max_capacity})"),
            ));
        }

        Ok(Self {
            name,
            min_capacity,
            max_capacity,
            description: description.filter(|d| !d.trim().is_empty()),
        })
    }
}

/// A dining table as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Identity.
    pub id: TableId,
    /// Unique human label ("T12").
    pub number: String,
    /// Seat count; immutable once created.
    pub capacity: Capacity,
    /// Current operational state.
    pub status: TableStatus,
    /// The category the table belongs to.
    pub category_id: CategoryId,
    /// Where in the room the table is.
    pub location: Option<String>,
    /// Whether the table is by a window.
    pub has_window: bool,
    /// Whether the table is in a private area.
    pub is_private: bool,
    /// Actor who last changed the table, if known.
    pub last_modified_by: Option<i64>,
    /// When the table was last changed.
    pub last_modified_at: NaiveDateTime,
}

/// A table that has not been stored yet.
///
/// New tables always start out [`TableStatus::Available`].
///
/// # Examples
///
/// ```
/// use maitre::{CategoryId, NewTable};
///
/// let table = NewTable::builder("T1", 4, CategoryId::new(1))
///     .location(Some("terrace".to_string()))
///     .window(true)
///     .build()
///     .unwrap();
/// assert_eq!(table.capacity.value(), 4);
/// assert!(table.has_window);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTable {
    /// Unique human label.
    pub number: String,
    /// Seat count.
    pub capacity: Capacity,
    /// Owning category.
    pub category_id: CategoryId,
    /// Where in the room the table is.
    pub location: Option<String>,
    /// Whether the table is by a window.
    pub has_window: bool,
    /// Whether the table is in a private area.
    pub is_private: bool,
    /// Actor creating the table.
    pub created_by: Option<i64>,
}

impl NewTable {
    /// Starts building a new table.
    #[must_use]
    pub fn builder(
        number: impl Into<String>,
        capacity: u32,
        category_id: CategoryId,
    ) -> NewTableBuilder {
        NewTableBuilder {
            number: number.into(),
            capacity,
            category_id,
            location: None,
            has_window: false,
            is_private: false,
            created_by: None,
        }
    }
}

/// Builder for [`NewTable`].
#[derive(Debug)]
pub struct NewTableBuilder {
    number: String,
    capacity: u32,
    category_id: CategoryId,
    location: Option<String>,
    has_window: bool,
    is_private: bool,
    created_by: Option<i64>,
}

impl NewTableBuilder {
    /// Sets the location description.
    #[must_use]
    pub fn location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    /// Marks the table as a window table.
    #[must_use]
    pub const fn window(mut self, has_window: bool) -> Self {
        self.has_window = has_window;
        self
    }

    /// Marks the table as private.
    #[must_use]
    pub const fn private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    /// Records who created the table.
    #[must_use]
    pub const fn created_by(mut self, actor: Option<i64>) -> Self {
        self.created_by = actor;
        self
    }

    /// Validates the fields and builds the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table number is blank or the capacity is out
    /// of range.
    pub fn build(self) -> Result<NewTable, ValidationError> {
        let number = non_blank("table_number", self.number)?;
        let capacity = Capacity::try_from(self.capacity)?;

        Ok(NewTable {
            number,
            capacity,
            category_id: self.category_id,
            location: self.location.filter(|l| !l.trim().is_empty()),
            has_window: self.has_window,
            is_private: self.is_private,
            created_by: self.created_by,
        })
    }
}

fn non_blank(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            field,
            "must be non-empty after trimming whitespace",
        ));
    }
    Ok(trimmed.to_string())
}
