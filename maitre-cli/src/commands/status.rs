//! Reservation status commands: `confirm`, `complete` and `cancel`.
//!
//! Completing or cancelling frees the table. Waiting parties that fit the
//! freed slot are printed to stdout in queue order so the host can offer it.

use crate::error::CliError;
use crate::output::{print_rows, OutputFormat};
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use maitre::operations::{ReservationLifecycle, SlotOpened, WaitlistQueue};
use maitre::{Database, ReservationId};

/// Confirm a pending reservation.
#[derive(Args)]
pub struct ConfirmCommand {
    /// Reservation id
    id: i64,
}

impl ConfirmCommand {
    /// Execute the confirm command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        ReservationLifecycle::new(&mut db).confirm(ReservationId::new(self.id))?;
        if !global.quiet {
            eprintln!("Confirmed reservation {}", self.id);
        }
        Ok(())
    }
}

/// Mark a reservation as completed.
#[derive(Args)]
pub struct CompleteCommand {
    /// Reservation id
    id: i64,

    /// Format for the list of waiting parties that fit the freed table
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    format: OutputFormat,
}

impl CompleteCommand {
    /// Execute the complete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let slot = ReservationLifecycle::new(&mut db).complete(ReservationId::new(self.id))?;
        if !global.quiet {
            eprintln!("Completed reservation {}", self.id);
        }
        offer_slot(&mut db, &slot, self.format, global)
    }
}

/// Cancel a reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    id: i64,

    /// Format for the list of waiting parties that fit the freed table
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    format: OutputFormat,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let slot = ReservationLifecycle::new(&mut db).cancel(ReservationId::new(self.id))?;
        if !global.quiet {
            eprintln!("Cancelled reservation {}", self.id);
        }
        offer_slot(&mut db, &slot, self.format, global)
    }
}

/// Print the waiting parties that fit a freed table.
fn offer_slot(
    db: &mut Database,
    slot: &SlotOpened,
    format: OutputFormat,
    global: &GlobalOptions,
) -> Result<(), CliError> {
    let candidates = WaitlistQueue::new(db).candidates_for(slot)?;
    if !global.quiet {
        eprintln!(
            "Table {} ({} seats) is free on {} at {}; {} waiting part{} fit",
            slot.table_id,
            slot.capacity,
            slot.date,
            slot.time.format("%H:%M"),
            candidates.len(),
            if candidates.len() == 1 { "y" } else { "ies" }
        );
    }
    if candidates.is_empty() {
        return Ok(());
    }
    print_rows(&candidates, format)
}
