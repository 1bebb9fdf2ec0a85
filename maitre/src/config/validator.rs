//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Longest sitting a default may specify.
const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// Checks value ranges that the schema types cannot express.
///
/// # Examples
///
/// ```
/// use maitre::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
#[derive(Debug)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(booking) = &config.booking {
            if let Some(minutes) = booking.default_duration_minutes {
                if minutes == 0 || minutes > MAX_DURATION_MINUTES {
                    return Err(invalid(
                        "booking.default_duration_minutes",
                        format!("must be between 1 and {MAX_DURATION_MINUTES}, got {minutes}"),
                    ));
                }
            }
        }

        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(invalid(
                    "maximum_lock_wait_seconds",
                    "must be greater than 0".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: String) -> Error {
    Error::InvalidConfig {
        field: field.into(),
        message,
    }
}
