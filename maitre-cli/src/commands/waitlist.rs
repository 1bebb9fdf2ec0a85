//! Waitlist command implementation.
//!
//! One queue per requested date and time. Leaving the queue in any way
//! closes the gap behind the party.

use crate::error::CliError;
use crate::output::{print_rows, OutputFormat};
use crate::utils::{load_configuration, open_database, parse_date, parse_time, GlobalOptions};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Subcommand};
use maitre::operations::WaitlistQueue;
use maitre::{CustomerId, WaitlistId};

/// Manage the waitlist.
#[derive(Args)]
pub struct WaitlistCommand {
    #[command(subcommand)]
    action: WaitlistAction,
}

#[derive(Subcommand)]
enum WaitlistAction {
    /// Add a party to the waitlist
    Join(JoinArgs),
    /// List active entries, or every entry of one customer
    List {
        /// Every entry of this customer, in any status
        #[arg(long, value_name = "ID")]
        customer: Option<i64>,

        /// Output format
        #[arg(long, value_enum, default_value = "table", ignore_case = true)]
        format: OutputFormat,
    },
    /// Mark an entry as seated
    Seat {
        /// Entry id
        id: i64,
    },
    /// Take a party off the waitlist
    Remove {
        /// Entry id
        id: i64,
    },
    /// Mark an entry as expired
    Expire {
        /// Entry id
        id: i64,
    },
    /// Delete an entry permanently
    Purge {
        /// Entry id
        id: i64,
    },
    /// Change the estimated wait of an entry
    SetWait {
        /// Entry id
        id: i64,

        /// Estimated wait in minutes
        minutes: u32,
    },
}

#[derive(Args)]
struct JoinArgs {
    /// Customer waiting
    #[arg(long, value_name = "ID")]
    customer: i64,

    /// Date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,

    /// Requested time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    time: NaiveTime,

    /// Party size
    #[arg(long)]
    party: u32,

    /// Estimated wait in minutes (defaults to the configured wait)
    #[arg(long, value_name = "MINUTES")]
    wait: Option<u32>,
}

impl WaitlistCommand {
    /// Execute the waitlist command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;
        let mut queue =
            WaitlistQueue::new(&mut db).with_default_wait(config.default_wait_minutes());

        match self.action {
            WaitlistAction::Join(args) => {
                if let Some(wait) = args.wait {
                    queue = queue.with_default_wait(wait);
                }
                let ticket = queue.join(
                    CustomerId::new(args.customer),
                    args.date,
                    args.time,
                    args.party,
                )?;
                if !global.quiet {
                    eprintln!("Joined the waitlist at position {}", ticket.position);
                }
                println!("{}", ticket.id);
            }
            WaitlistAction::List { customer, format } => {
                let entries = match customer {
                    Some(customer) => queue.for_customer(CustomerId::new(customer))?,
                    None => queue.active()?,
                };
                print_rows(&entries, format)?;
            }
            WaitlistAction::Seat { id } => {
                queue.seat(WaitlistId::new(id))?;
                done(global, "Seated", id);
            }
            WaitlistAction::Remove { id } => {
                queue.remove(WaitlistId::new(id))?;
                done(global, "Removed", id);
            }
            WaitlistAction::Expire { id } => {
                queue.expire(WaitlistId::new(id))?;
                done(global, "Expired", id);
            }
            WaitlistAction::Purge { id } => {
                queue.purge(WaitlistId::new(id))?;
                done(global, "Purged", id);
            }
            WaitlistAction::SetWait { id, minutes } => {
                queue.set_wait_time(WaitlistId::new(id), minutes)?;
                if !global.quiet {
                    eprintln!("Waitlist entry {id} now expects a {minutes} minute wait");
                }
            }
        }

        Ok(())
    }
}

fn done(global: &GlobalOptions, verb: &str, id: i64) {
    if !global.quiet {
        eprintln!("{verb} waitlist entry {id}");
    }
}
