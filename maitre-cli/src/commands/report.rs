//! Report command implementation.

use crate::error::CliError;
use crate::output::{print_rows, OutputFormat};
use crate::utils::{load_configuration, open_database, parse_date, today, GlobalOptions};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use maitre::operations::Reports;

/// Print reports.
#[derive(Args)]
pub struct ReportCommand {
    #[command(subcommand)]
    report: ReportKind,
}

#[derive(Subcommand)]
enum ReportKind {
    /// Every reservation on a date, by time
    Daily {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Output format
        #[arg(long, value_enum, default_value = "table", ignore_case = true)]
        format: OutputFormat,
    },
    /// Reservations per table on a date
    Utilization {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Output format
        #[arg(long, value_enum, default_value = "table", ignore_case = true)]
        format: OutputFormat,
    },
    /// How many parties are waiting and for how long
    Waitlist {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl ReportCommand {
    /// Execute the report command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let reports = Reports::new(&db);

        match self.report {
            ReportKind::Daily { date, format } => {
                print_rows(&reports.daily(date.unwrap_or_else(today))?, format)?;
            }
            ReportKind::Utilization { date, format } => {
                print_rows(&reports.utilization(date.unwrap_or_else(today))?, format)?;
            }
            ReportKind::Waitlist { json } => {
                let summary = reports.waitlist()?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                } else {
                    println!("waiting: {}", summary.waiting);
                    match summary.average_wait_minutes {
                        Some(avg) => println!("average wait: {avg:.1} min"),
                        None => println!("average wait: -"),
                    }
                }
            }
        }

        Ok(())
    }
}
