//! Main entry point for the maitre CLI.
//!
//! This is the command-line front desk for the maitre reservation engine.
//! Every engine operation is reachable from here: managing the floor plan,
//! booking and moving reservations through their lifecycle, working the
//! waitlist, and printing simple reports.

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use clap::Parser;
use cli::{Cli, Command};
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let level = maitre::init_logger(cli.verbose, cli.quiet);
    log::debug!("log level: {level}");

    let global = GlobalOptions {
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        Command::Init(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
        Command::Table(cmd) => cmd.execute(&global),
        Command::Category(cmd) => cmd.execute(&global),
        Command::Candidates(cmd) => cmd.execute(&global),
        Command::Book(cmd) => cmd.execute(&global),
        Command::Confirm(cmd) => cmd.execute(&global),
        Command::Complete(cmd) => cmd.execute(&global),
        Command::Cancel(cmd) => cmd.execute(&global),
        Command::Reservations(cmd) => cmd.execute(&global),
        Command::Waitlist(cmd) => cmd.execute(&global),
        Command::Report(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
