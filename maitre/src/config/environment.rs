//! `MAITRE_*` environment variable overrides.

use std::env;
use std::str::FromStr;

use crate::config::schema::{Config, InitialStatus};
use crate::error::{Error, Result};

/// Applies environment variable overrides to a configuration.
///
/// | Variable | Field |
/// |----------|-------|
/// | `MAITRE_DEFAULT_DURATION_MINUTES` | `booking.default_duration_minutes` |
/// | `MAITRE_INITIAL_STATUS` | `booking.initial_status` |
/// | `MAITRE_DEFAULT_WAIT_MINUTES` | `waitlist.default_wait_minutes` |
/// | `MAITRE_MAXIMUM_LOCK_WAIT_SECONDS` | `maximum_lock_wait_seconds` |
/// | `MAITRE_DISABLE_AUTOINIT` | `disable_autoinit` |
///
/// # Examples
///
/// ```no_run
/// use maitre::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
#[derive(Debug)]
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Overwrites fields of `config` with any `MAITRE_*` variables set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the variable if a value cannot be
    /// parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("MAITRE_DEFAULT_DURATION_MINUTES") {
            let minutes = Self::parse_number("MAITRE_DEFAULT_DURATION_MINUTES", &val)?;
            config
                .booking
                .get_or_insert_with(Default::default)
                .default_duration_minutes = Some(minutes);
        }

        if let Ok(val) = env::var("MAITRE_INITIAL_STATUS") {
            let status = Self::parse_initial_status(&val)?;
            config
                .booking
                .get_or_insert_with(Default::default)
                .initial_status = Some(status);
        }

        if let Ok(val) = env::var("MAITRE_DEFAULT_WAIT_MINUTES") {
            let minutes = Self::parse_number("MAITRE_DEFAULT_WAIT_MINUTES", &val)?;
            config
                .waitlist
                .get_or_insert_with(Default::default)
                .default_wait_minutes = Some(minutes);
        }

        if let Ok(val) = env::var("MAITRE_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number("MAITRE_MAXIMUM_LOCK_WAIT_SECONDS", &val)?);
        }

        if let Ok(val) = env::var("MAITRE_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("MAITRE_DISABLE_AUTOINIT", &val)?);
        }

        Ok(())
    }

    /// Accepts true/1/yes/on and false/0/no/off, ignoring case.
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::InvalidConfig {
                field: field.into(),
                message: format!(
                    "invalid boolean value '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::InvalidConfig {
            field: field.into(),
            message: format!("'{s}' is not a non-negative integer"),
        })
    }

    fn parse_initial_status(s: &str) -> Result<InitialStatus> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(InitialStatus::Pending),
            "confirmed" => Ok(InitialStatus::Confirmed),
            _ => Err(Error::InvalidConfig {
                field: "MAITRE_INITIAL_STATUS".into(),
                message: format!("'{s}' is not pending or confirmed"),
            }),
        }
    }
}
