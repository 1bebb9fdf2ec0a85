//! Layered configuration.
//!
//! # Configuration Precedence
//!
//! Highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`MAITRE_*`)
//! 3. User config (`<data_dir>/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use maitre::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("default sitting: {} minutes", config.default_duration_minutes());
//! ```
//!
//! A file setting every key:
//!
//! ```yaml
//! booking:
//!   default_duration_minutes: 90
//!   initial_status: confirmed
//! waitlist:
//!   default_wait_minutes: 45
//! maximum_lock_wait_seconds: 10
//! disable_autoinit: false
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{
    BookingConfig, Config, InitialStatus, WaitlistConfig, DEFAULT_LOCK_WAIT_SECONDS,
};
pub use validator::ConfigValidator;
