//! Integration tests for error handling and exit codes.
//!
//! - Exit code 0: Success
//! - Exit code 1: Semantic failure (conflict, disallowed status change, no table)
//! - Exit code 2: Timeout (SQLite busy) or a clap usage error
//! - Exit code 3: No data directory found
//! - Exit code 4: Invalid input
//! - Exit code 7: Configuration error
//! - Exit code 8: Record not found

mod common;

use common::{TestEnv, DATE};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_success_exit_code() {
    let env = TestEnv::new();
    env.command().args(["table", "list"]).assert().code(0);
}

#[test]
fn test_no_data_directory_exit_code() {
    let env = TestEnv::new();

    env.command()
        .args(["--disable-autoinit", "table", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("maitre init"));

    assert!(!env.data_dir.join("maitre.db").exists());
}

#[test]
fn test_disable_autoinit_from_environment() {
    let env = TestEnv::new();

    env.command()
        .env("MAITRE_DISABLE_AUTOINIT", "true")
        .args(["table", "list"])
        .assert()
        .code(3);
}

#[test]
fn test_bad_date_is_usage_error() {
    let env = TestEnv::new();

    env.command()
        .args(["book", "--customer", "1", "--date", "tomorrow", "--time", "19:00"])
        .args(["--party", "2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_unknown_subcommand() {
    let env = TestEnv::new();
    env.command().arg("reserve").assert().failure();
}

#[test]
fn test_past_booking_is_validation_error() {
    let env = TestEnv::new();
    let table = env.seed_tables(&[4])[0];

    env.command()
        .args(["book", "--customer", "1", "--date", "2001-01-01", "--time", "19:00"])
        .args(["--party", "2", "--table"])
        .arg(table.to_string())
        .assert()
        .code(4);
}

#[test]
fn test_invalid_config_file_exit_code() {
    let env = TestEnv::new();
    fs::create_dir_all(&env.data_dir).unwrap();
    fs::write(
        env.data_dir.join("config.yaml"),
        "booking:\n  default_duration_minutes: 0\n",
    )
    .unwrap();

    env.command()
        .args(["table", "list"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("default_duration_minutes"));
}

#[test]
fn test_unknown_config_key_exit_code() {
    let env = TestEnv::new();
    fs::create_dir_all(&env.data_dir).unwrap();
    fs::write(env.data_dir.join("config.yaml"), "ports: 8080\n").unwrap();

    env.command().args(["table", "list"]).assert().code(7);
}

#[test]
fn test_bad_environment_value_exit_code() {
    let env = TestEnv::new();

    env.command()
        .env("MAITRE_DEFAULT_WAIT_MINUTES", "soon")
        .args(["table", "list"])
        .assert()
        .code(7);
}

#[test]
fn test_not_found_exit_code() {
    let env = TestEnv::new();

    env.command()
        .args(["table", "status", "42", "available"])
        .assert()
        .code(8);
    env.command().args(["waitlist", "seat", "42"]).assert().code(8);
}

#[test]
fn test_errors_go_to_stderr() {
    let env = TestEnv::new();
    let table = env.seed_tables(&[4])[0];
    env.book(1, table, "18:00", 2);

    env.command()
        .args(["book", "--customer", "2", "--date", DATE, "--time", "18:00"])
        .args(["--party", "2", "--table"])
        .arg(table.to_string())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("Error: "));
}
