//! Table command implementation.
//!
//! `table add`, `table list` and `table status` manage the floor plan.

use crate::error::CliError;
use crate::output::{print_rows, OutputFormat};
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::{Args, Subcommand, ValueEnum};
use maitre::operations::TableRegistry;
use maitre::{CategoryId, NewTable, TableId, TableStatus};

/// Manage tables.
#[derive(Args)]
pub struct TableCommand {
    #[command(subcommand)]
    action: TableAction,
}

#[derive(Subcommand)]
enum TableAction {
    /// Add a table
    Add(AddTable),
    /// List all tables
    List(ListTables),
    /// Set a table's status
    Status(SetStatus),
}

#[derive(Args)]
struct AddTable {
    /// Table label, e.g. "T12"
    number: String,

    /// Number of seats
    #[arg(long)]
    capacity: u32,

    /// Category the table belongs to
    #[arg(long, value_name = "ID")]
    category: i64,

    /// Free-text location, e.g. "terrace"
    #[arg(long)]
    location: Option<String>,

    /// Table is by a window
    #[arg(long)]
    window: bool,

    /// Table is in a private area
    #[arg(long)]
    private: bool,

    /// Staff member recorded as the creator
    #[arg(long, value_name = "ID")]
    actor: Option<i64>,
}

#[derive(Args)]
struct ListTables {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    format: OutputFormat,
}

#[derive(Args)]
struct SetStatus {
    /// Table id
    id: i64,

    /// New status
    #[arg(value_enum, ignore_case = true)]
    status: StatusArg,

    /// Staff member recorded as making the change
    #[arg(long, value_name = "ID")]
    actor: Option<i64>,
}

#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
enum StatusArg {
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

impl From<StatusArg> for TableStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Available => Self::Available,
            StatusArg::Occupied => Self::Occupied,
            StatusArg::Reserved => Self::Reserved,
            StatusArg::Maintenance => Self::Maintenance,
        }
    }
}

impl TableCommand {
    /// Execute the table command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let registry = TableRegistry::new(&db);

        match self.action {
            TableAction::Add(args) => {
                let category = CategoryId::new(args.category);
                let table = NewTable::builder(args.number, args.capacity, category)
                    .location(args.location)
                    .window(args.window)
                    .private(args.private)
                    .created_by(args.actor)
                    .build()
                    .map_err(maitre::Error::from)?;
                let id = registry.add_table(&table)?;
                println!("{id}");
            }
            TableAction::List(args) => {
                print_rows(&registry.list_tables()?, args.format)?;
            }
            TableAction::Status(args) => {
                let status = TableStatus::from(args.status);
                registry.set_status(TableId::new(args.id), status, args.actor)?;
                if !global.quiet {
                    eprintln!("Table {} is now {status}", args.id);
                }
            }
        }

        Ok(())
    }
}
