//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the maitre data directory and database.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Args;
use maitre::operations::{init_database, InitOptions};
use std::path::PathBuf;

/// Initialize the maitre data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Data directory to initialize (defaults to the global data directory)
    #[arg(long = "dir", value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Replace an existing database
    #[arg(long)]
    overwrite: bool,

    /// Create a commented configuration file
    #[arg(long)]
    with_config: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` has no effect here; this is the explicit path.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = match self.dir {
            Some(dir) => dir,
            None => resolve_data_dir(global)?,
        };

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);
        let result = init_database(&options)?;

        if global.quiet {
            return Ok(());
        }

        println!("Initialized maitre in: {}", result.data_dir.display());
        if result.data_dir_created {
            println!("  - Created data directory");
        }
        if result.database_created {
            if self.overwrite {
                println!("  - Recreated database");
            } else {
                println!("  - Created database");
            }
        }
        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
