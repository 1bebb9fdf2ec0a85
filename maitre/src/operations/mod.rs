//! The reservation and waitlist engine.
//!
//! Operations borrow an explicitly opened [`Database`](crate::Database).
//! Those that write run inside one IMMEDIATE transaction each, so a booking's
//! availability check, its insert, and the table status change commit
//! together, and two processes booking the same table serialize.
//!
//! # Architecture
//!
//! - [`AvailabilityChecker`] and [`TableAllocator`] are read-only and take a
//!   `&Connection`, so they work on an open transaction.
//! - [`ReservationLifecycle`] creates reservations and moves them between
//!   states, reserving and freeing tables as it goes.
//! - [`WaitlistQueue`] keeps the overflow queue numbered `1..=n`.
//! - [`TableRegistry`] and [`Reports`] cover setup and read-outs.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::{NaiveDate, NaiveTime};
//! use maitre::operations::{BookingOutcome, ReservationLifecycle, WaitlistQueue};
//! use maitre::{BookingRequest, CustomerId, Database, DatabaseConfig};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/maitre.db")).unwrap();
//! let date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
//! let time = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
//! let request = BookingRequest::new(CustomerId::new(1), date, time, 4);
//!
//! let outcome = ReservationLifecycle::new(&mut db).book_best_fit(&request).unwrap();
//! if outcome == BookingOutcome::NoCapacity {
//!     let ticket = WaitlistQueue::new(&mut db)
//!         .join(CustomerId::new(1), date, time, 4)
//!         .unwrap();
//!     println!("waitlisted at position {}", ticket.position);
//! }
//! ```

pub mod allocator;
pub mod availability;
pub mod clock;
pub mod init;
pub mod lifecycle;
pub mod registry;
pub mod reports;
pub mod waitlist;

#[cfg(test)]
mod proptests;

pub use allocator::{SeatingRequest, TableAllocator};
pub use availability::AvailabilityChecker;
pub use clock::{Clock, FixedClock, SystemClock};
pub use init::{init_database, InitOptions, InitResult};
pub use lifecycle::{BookingOutcome, ReservationLifecycle, SlotOpened};
pub use registry::TableRegistry;
pub use reports::{Reports, TableUtilization, WaitlistSummary};
pub use waitlist::WaitlistQueue;
