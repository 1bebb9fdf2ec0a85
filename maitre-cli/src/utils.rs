//! Utility functions for CLI operations.
//!
//! This module provides helpers shared across commands: locating the data
//! directory, loading configuration, opening the database, and parsing
//! dates and times from the command line.

use crate::error::CliError;
use chrono::{NaiveDate, NaiveTime, Timelike};
use maitre::database::{resolve_data_dir as default_data_dir, DATABASE_FILE_NAME};
use maitre::{Config, ConfigBuilder, Database, DatabaseConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir` / `MAITRE_DATA_DIR`, else `~/.maitre`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => default_data_dir()
            .map_err(|_| CliError::Config("Could not determine home directory".to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. `<data_dir>/config.yaml`
/// 3. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;
    let config = ConfigBuilder::new().with_data_dir(&data_dir).build()?;
    Ok(config)
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled by flag, environment or configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    if !db_path.exists() && (global.disable_autoinit || config.autoinit_disabled()) {
        return Err(CliError::NoDataDirectory);
    }

    let timeout = global
        .busy_timeout
        .map_or_else(|| config.lock_timeout(), |s| Duration::from_secs(s.into()));
    log::debug!(
        "opening {} (busy timeout {}s)",
        db_path.display(),
        timeout.as_secs()
    );

    Ok(Database::open(
        DatabaseConfig::new(db_path).with_busy_timeout(timeout),
    )?)
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{s}' is not a date (expected YYYY-MM-DD)"))
}

/// Parse an `HH:MM` time argument. Seconds are accepted and dropped.
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map(|t| t.with_second(0).unwrap_or(t))
        .map_err(|_| format!("'{s}' is not a time (expected HH:MM)"))
}

/// Today's date on the local clock.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(data_dir: Option<PathBuf>) -> GlobalOptions {
        GlobalOptions {
            quiet: false,
            data_dir,
            busy_timeout: None,
            disable_autoinit: false,
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2030-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
        );
        assert!(parse_date("01/01/2030").is_err());
        assert!(parse_date("2030-02-30").is_err());
    }

    #[test]
    fn test_parse_time() {
        let seven = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
        assert_eq!(parse_time("19:00").unwrap(), seven);
        assert_eq!(parse_time("19:00:45").unwrap(), seven);
        assert!(parse_time("7pm").is_err());
        assert!(parse_time("24:00").is_err());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = PathBuf::from("/srv/maitre");
        assert_eq!(resolve_data_dir(&global(Some(dir.clone()))).unwrap(), dir);
    }

    #[test]
    fn test_disable_autoinit_refuses_missing_database() {
        let temp = tempfile::tempdir().unwrap();
        let mut opts = global(Some(temp.path().join("missing")));
        opts.disable_autoinit = true;

        let err = open_database(&opts, &Config::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_open_database_creates_file() {
        let temp = tempfile::tempdir().unwrap();
        let opts = global(Some(temp.path().to_path_buf()));

        open_database(&opts, &Config::default()).unwrap();
        assert!(temp.path().join(DATABASE_FILE_NAME).exists());
    }
}
