//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{BookingConfig, Config, WaitlistConfig};

/// Merges configuration layers; later layers win field by field.
///
/// # Examples
///
/// ```
/// use maitre::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(9), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(9));
/// ```
#[derive(Debug)]
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges sources given lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merges `source` over `target`. Fields set in `source` win; nested
    /// sections merge field by field.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if let Some(ref source_booking) = source.booking {
            target.booking = Some(match &target.booking {
                Some(target_booking) => Self::merge_booking(target_booking, source_booking),
                None => source_booking.clone(),
            });
        }

        if let Some(ref source_waitlist) = source.waitlist {
            target.waitlist = Some(match &target.waitlist {
                Some(target_waitlist) => Self::merge_waitlist(target_waitlist, source_waitlist),
                None => source_waitlist.clone(),
            });
        }
    }

    fn merge_booking(target: &BookingConfig, source: &BookingConfig) -> BookingConfig {
        BookingConfig {
            default_duration_minutes: source
                .default_duration_minutes
                .or(target.default_duration_minutes),
            initial_status: source.initial_status.or(target.initial_status),
        }
    }

    fn merge_waitlist(target: &WaitlistConfig, source: &WaitlistConfig) -> WaitlistConfig {
        WaitlistConfig {
            default_wait_minutes: source.default_wait_minutes.or(target.default_wait_minutes),
        }
    }
}
