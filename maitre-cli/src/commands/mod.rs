//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create the data directory and database
//! - `completions`: Generate shell completion scripts
//! - `table`: Add, list and change the status of tables
//! - `category`: Add and list table categories
//! - `candidates`: Show which tables could seat a party
//! - `book`: Book a specific table or the best-fitting one
//! - `confirm`, `complete`, `cancel`: Move a reservation through its lifecycle
//! - `reservations`: List reservations by customer, date, or activity
//! - `waitlist`: Join, list and resolve waitlist entries
//! - `report`: Daily, utilization and waitlist reports

pub mod book;
pub mod candidates;
pub mod category;
pub mod completions;
pub mod init;
pub mod report;
pub mod reservations;
pub mod status;
pub mod table;
pub mod waitlist;

pub use book::BookCommand;
pub use candidates::CandidatesCommand;
pub use category::CategoryCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use report::ReportCommand;
pub use reservations::ReservationsCommand;
pub use status::{CancelCommand, CompleteCommand, ConfirmCommand};
pub use table::TableCommand;
pub use waitlist::WaitlistCommand;
