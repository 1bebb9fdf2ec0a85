//! Explicit setup of the data directory and database.

use std::fs;
use std::path::PathBuf;

use crate::database::{Database, DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::{Error, Result};

/// What `init` should do.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a commented `config.yaml` if none exists.
    pub create_config: bool,
}

impl InitOptions {
    /// Options for `data_dir` with nothing overwritten and no config file.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether an existing database is replaced.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether a starter config file is written.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// What `init` did.
#[derive(Debug)]
pub struct InitResult {
    /// The directory had to be created.
    pub data_dir_created: bool,
    /// A fresh database was written.
    pub database_created: bool,
    /// A starter config file was written.
    pub config_created: bool,
    /// The directory initialized.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# maitre configuration

# booking:
#   default_duration_minutes: 120
#   initial_status: pending      # or confirmed

# waitlist:
#   default_wait_minutes: 120

# Seconds to wait for another writer before giving up (default: 5)
# maximum_lock_wait_seconds: 5

# Refuse to create the database implicitly; require `maitre init`
# disable_autoinit: false
";

/// Creates the data directory and an empty database.
///
/// # Errors
///
/// Returns `Validation` if a database already exists and `overwrite` is not
/// set, and I/O or store errors otherwise.
///
/// # Examples
///
/// ```no_run
/// use maitre::operations::init::{init_database, InitOptions};
/// use std::path::PathBuf;
///
/// let result = init_database(&InitOptions::new(PathBuf::from("/tmp/maitre"))).unwrap();
/// assert!(result.database_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::Validation {
                field: "database".into(),
                message: format!(
                    "database already exists at {}; pass --overwrite to replace it",
                    db_path.display()
                ),
            });
        }
        fs::remove_file(&db_path)?;
        for suffix in ["-wal", "-shm"] {
            let side = options.data_dir.join(format!("{DATABASE_FILE_NAME}{suffix}"));
            if side.exists() {
                fs::remove_file(side)?;
            }
        }
    }

    Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = true;
    log::info!("initialized {}", db_path.display());

    if options.create_config {
        let config_path = options.data_dir.join("config.yaml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    Ok(result)
}
