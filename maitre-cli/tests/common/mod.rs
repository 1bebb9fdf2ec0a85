//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - A small seeded floor plan

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A booking date far enough out that the system clock never reaches it.
pub const DATE: &str = "2099-06-01";

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the maitre data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; maitre creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("maitre-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A command with no flags and a clean maitre environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("maitre").expect("Failed to find maitre binary");
        for var in [
            "MAITRE_DATA_DIR",
            "MAITRE_BUSY_TIMEOUT",
            "MAITRE_DISABLE_AUTOINIT",
            "MAITRE_LOG_MODE",
            "MAITRE_DEFAULT_DURATION_MINUTES",
            "MAITRE_INITIAL_STATUS",
            "MAITRE_DEFAULT_WAIT_MINUTES",
            "MAITRE_MAXIMUM_LOCK_WAIT_SECONDS",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Run a command that must succeed and return its trimmed stdout.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run maitre");

        assert!(
            output.status.success(),
            "maitre {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// Run a command that prints a single id and return it.
    pub fn run_id(&self, args: &[&str]) -> i64 {
        let out = self.run(args);
        out.parse()
            .unwrap_or_else(|_| panic!("expected an id from {args:?}, got {out:?}"))
    }

    /// Add a 1-20 seat category and one table per capacity.
    ///
    /// Returns the table ids in the order given.
    pub fn seed_tables(&self, capacities: &[u32]) -> Vec<i64> {
        let category = self.run_id(&["category", "add", "Main", "--min", "1", "--max", "20"]);
        capacities
            .iter()
            .enumerate()
            .map(|(i, capacity)| {
                self.run_id(&[
                    "table",
                    "add",
                    &format!("T{}", i + 1),
                    "--capacity",
                    &capacity.to_string(),
                    "--category",
                    &category.to_string(),
                ])
            })
            .collect()
    }

    /// Book `table` for `customer` at `time` on [`DATE`] and return the id.
    pub fn book(&self, customer: i64, table: i64, time: &str, party: u32) -> i64 {
        self.run_id(&[
            "book",
            "--customer",
            &customer.to_string(),
            "--date",
            DATE,
            "--time",
            time,
            "--party",
            &party.to_string(),
            "--table",
            &table.to_string(),
        ])
    }

    /// Put `customer` on the waitlist for `time` on [`DATE`] and return the id.
    pub fn join(&self, customer: i64, time: &str, party: u32) -> i64 {
        self.run_id(&[
            "waitlist",
            "join",
            "--customer",
            &customer.to_string(),
            "--date",
            DATE,
            "--time",
            time,
            "--party",
            &party.to_string(),
        ])
    }

    /// Rows of a `--format json` listing.
    pub fn json(&self, args: &[&str]) -> Vec<serde_json::Value> {
        let mut full = args.to_vec();
        full.extend(["--format", "json"]);
        serde_json::from_str(&self.run(&full)).expect("Output is not JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
