#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # maitre
//!
//! A reservation and waitlist engine for a restaurant floor.
//!
//! The library books parties onto tables without double-booking them,
//! drives reservations through their lifecycle, and keeps an ordered
//! waitlist for parties that could not be seated. State lives in a local
//! `SQLite` database that several processes may share.
//!
//! ## Core Types
//!
//! - [`Table`], [`TableCategory`], [`Capacity`]: the dining room
//! - [`Reservation`], [`BookingRequest`], [`PartySize`], [`TimeWindow`]: bookings
//! - [`WaitlistEntry`] and [`WaitlistTicket`]: the overflow queue
//! - [`Error`], [`ErrorKind`], [`Result`]: error handling
//! - [`operations`]: the engine itself
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveTime;
//! use maitre::{Capacity, PartySize, TimeWindow};
//!
//! let table = Capacity::try_from(4).unwrap();
//! assert!(table.seats(PartySize::try_from(4).unwrap()));
//! assert!(!table.seats(PartySize::try_from(5).unwrap()));
//!
//! let dinner = TimeWindow::new(NaiveTime::from_hms_opt(18, 0, 0).unwrap(), 120).unwrap();
//! let late = TimeWindow::new(NaiveTime::from_hms_opt(20, 0, 0).unwrap(), 60).unwrap();
//! assert!(!dinner.overlaps(&late));
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod ids;
pub mod logging;
pub mod operations;
pub mod reservation;
pub mod table;
pub mod waitlist;
pub mod window;

pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, ErrorKind, Result};
pub use ids::{CategoryId, CustomerId, ReservationId, TableId, WaitlistId};
pub use logging::{init_logger, LogLevel, Logger};
pub use reservation::{BookingRequest, PartySize, Reservation, ReservationStatus};
pub use table::{Capacity, NewCategory, NewTable, Table, TableCategory, TableStatus};
pub use waitlist::{WaitlistEntry, WaitlistStatus, WaitlistTicket};
pub use window::TimeWindow;
