//! Book command implementation.
//!
//! Books a named table, or lets the allocator pick the smallest table that
//! fits. With `--waitlist-on-full` a party that cannot be seated joins the
//! waitlist for the requested slot instead of failing.
//!
//! Output on stdout is the reservation id, or `waitlist <id> <position>`
//! when the party was queued.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_date, parse_time, GlobalOptions};
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use maitre::operations::{BookingOutcome, ReservationLifecycle, WaitlistQueue};
use maitre::{BookingRequest, CustomerId, ReservationStatus, TableId};

/// Book a table.
#[derive(Args)]
pub struct BookCommand {
    /// Customer making the booking
    #[arg(long, value_name = "ID")]
    customer: i64,

    /// Date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,

    /// Start time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    time: NaiveTime,

    /// Party size
    #[arg(long)]
    party: u32,

    /// Book this table instead of picking the best fit
    #[arg(long, value_name = "ID", conflicts_with = "waitlist_on_full")]
    table: Option<i64>,

    /// Length of the stay in minutes (defaults to the configured duration)
    #[arg(long, value_name = "MINUTES")]
    duration: Option<u32>,

    /// Free-text notes
    #[arg(long)]
    notes: Option<String>,

    /// Create the reservation as confirmed
    #[arg(long)]
    confirmed: bool,

    /// Join the waitlist when no table is free
    #[arg(long)]
    waitlist_on_full: bool,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let customer = CustomerId::new(self.customer);
        let status = if self.confirmed {
            ReservationStatus::Confirmed
        } else {
            config.initial_status()
        };
        let request = BookingRequest::new(customer, self.date, self.time, self.party)
            .with_duration(
                self.duration
                    .unwrap_or_else(|| config.default_duration_minutes()),
            )
            .with_notes(self.notes)
            .with_initial_status(status);

        let mut lifecycle = ReservationLifecycle::new(&mut db);

        if let Some(table) = self.table {
            let id = lifecycle.create(TableId::new(table), &request)?;
            println!("{id}");
            return Ok(());
        }

        match lifecycle.book_best_fit(&request)? {
            BookingOutcome::Booked {
                reservation_id,
                table,
            } => {
                if !global.quiet {
                    eprintln!(
                        "Booked table {} ({} seats) for reservation {reservation_id}",
                        table.number, table.capacity
                    );
                }
                println!("{reservation_id}");
                Ok(())
            }
            BookingOutcome::NoCapacity if self.waitlist_on_full => {
                let ticket = WaitlistQueue::new(&mut db)
                    .with_default_wait(config.default_wait_minutes())
                    .join(customer, self.date, self.time, self.party)?;
                if !global.quiet {
                    eprintln!(
                        "No table free; joined the waitlist at position {}",
                        ticket.position
                    );
                }
                println!("waitlist {} {}", ticket.id, ticket.position);
                Ok(())
            }
            BookingOutcome::NoCapacity => Err(CliError::SemanticFailure(format!(
                "No table can seat a party of {} on {} at {}",
                self.party,
                self.date,
                self.time.format("%H:%M")
            ))),
        }
    }
}
