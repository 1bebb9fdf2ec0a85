//! Reservations command implementation.
//!
//! Lists reservations for one customer, for one date, or (by default) every
//! active reservation from today on.

use crate::error::CliError;
use crate::output::{print_rows, OutputFormat};
use crate::utils::{load_configuration, open_database, parse_date, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use maitre::operations::ReservationLifecycle;
use maitre::CustomerId;

/// List reservations.
#[derive(Args)]
pub struct ReservationsCommand {
    /// Every reservation made by this customer
    #[arg(long, value_name = "ID", conflicts_with_all = ["date", "active"])]
    customer: Option<i64>,

    /// Every reservation on this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, conflicts_with = "active")]
    date: Option<NaiveDate>,

    /// Pending and confirmed reservations from today on (the default)
    #[arg(long)]
    #[allow(dead_code)]
    active: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    format: OutputFormat,
}

impl ReservationsCommand {
    /// Execute the reservations command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let lifecycle = ReservationLifecycle::new(&mut db);

        let reservations = match (self.customer, self.date) {
            (Some(customer), _) => lifecycle.for_customer(CustomerId::new(customer))?,
            (None, Some(date)) => lifecycle.on_date(date)?,
            (None, None) => lifecycle.active()?,
        };

        print_rows(&reservations, self.format)
    }
}
