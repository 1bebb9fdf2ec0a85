//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    BookCommand, CancelCommand, CandidatesCommand, CategoryCommand, CompleteCommand,
    CompletionsCommand, ConfirmCommand, InitCommand, ReportCommand, ReservationsCommand,
    TableCommand, WaitlistCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for restaurant reservations and waitlists.
#[derive(Parser)]
#[command(name = "maitre")]
#[command(version, about = "Book tables and manage the waitlist", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "MAITRE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "MAITRE_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "MAITRE_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),

    /// Manage tables
    Table(TableCommand),

    /// Manage table categories
    Category(CategoryCommand),

    /// List tables that could seat a party
    Candidates(CandidatesCommand),

    /// Book a table
    Book(BookCommand),

    /// Confirm a pending reservation
    Confirm(ConfirmCommand),

    /// Mark a reservation as completed and free its table
    Complete(CompleteCommand),

    /// Cancel a reservation and free its table
    Cancel(CancelCommand),

    /// List reservations
    Reservations(ReservationsCommand),

    /// Manage the waitlist
    Waitlist(WaitlistCommand),

    /// Print reports
    Report(ReportCommand),
}
