//! Category command implementation.

use crate::error::CliError;
use crate::output::{print_rows, OutputFormat};
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::{Args, Subcommand};
use maitre::operations::TableRegistry;
use maitre::NewCategory;

/// Manage table categories.
#[derive(Args)]
pub struct CategoryCommand {
    #[command(subcommand)]
    action: CategoryAction,
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Add a category
    Add {
        /// Category name, e.g. "Booth"
        name: String,

        /// Smallest table capacity in this category
        #[arg(long)]
        min: u32,

        /// Largest table capacity in this category
        #[arg(long)]
        max: u32,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,
    },
    /// List categories
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "table", ignore_case = true)]
        format: OutputFormat,
    },
}

impl CategoryCommand {
    /// Execute the category command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let registry = TableRegistry::new(&db);

        match self.action {
            CategoryAction::Add {
                name,
                min,
                max,
                description,
            } => {
                let category =
                    NewCategory::new(name, min, max, description).map_err(maitre::Error::from)?;
                println!("{}", registry.add_category(&category)?);
            }
            CategoryAction::List { format } => {
                print_rows(&registry.list_categories()?, format)?;
            }
        }

        Ok(())
    }
}
