//! Candidates command implementation.
//!
//! Shows the tables that could take a party at a given time, smallest first,
//! without booking anything.

use crate::error::CliError;
use crate::output::{print_rows, OutputFormat};
use crate::utils::{load_configuration, open_database, parse_date, parse_time, GlobalOptions};
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use maitre::operations::{SeatingRequest, TableAllocator};

/// List tables that could seat a party.
#[derive(Args)]
pub struct CandidatesCommand {
    /// Party size
    #[arg(long)]
    party: u32,

    /// Date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,

    /// Start time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    time: NaiveTime,

    /// Length of the stay in minutes (defaults to the configured duration)
    #[arg(long, value_name = "MINUTES")]
    duration: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    format: OutputFormat,
}

impl CandidatesCommand {
    /// Execute the candidates command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let request = SeatingRequest {
            party_size: self.party,
            date: self.date,
            time: self.time,
            duration_minutes: self
                .duration
                .unwrap_or_else(|| config.default_duration_minutes()),
        };
        let tables = TableAllocator::find_candidates(db.connection(), &request)?;

        if tables.is_empty() && !global.quiet {
            eprintln!("No table can seat this party");
        }
        print_rows(&tables, self.format)
    }
}
