//! Integration tests for global flags, environment variables and the
//! configuration file.

mod common;

use common::{TestEnv, DATE};
use predicates::prelude::*;
use std::fs;

fn book_best_fit(env: &TestEnv, customer: &str, time: &str) -> assert_cmd::assert::Assert {
    env.command()
        .args(["book", "--customer", customer, "--date", DATE, "--time", time])
        .args(["--party", "2"])
        .assert()
}

#[test]
fn test_verbose_flag_enables_debug_logging() {
    let env = TestEnv::new();
    env.seed_tables(&[4]);

    book_best_fit(&env, "1", "18:00")
        .success()
        .stderr(predicate::str::contains("DEBUG").not());

    env.command()
        .args(["--verbose", "candidates", "--party", "2", "--date", DATE])
        .args(["--time", "21:00"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_quiet_flag_suppresses_messages() {
    let env = TestEnv::new();
    env.seed_tables(&[4]);

    env.command()
        .args(["--quiet", "book", "--customer", "1", "--date", DATE])
        .args(["--time", "18:00", "--party", "2"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+\n$").unwrap())
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_log_mode_environment() {
    let env = TestEnv::new();

    env.command()
        .env("MAITRE_LOG_MODE", "verbose")
        .args(["table", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_data_dir_from_environment() {
    let env = TestEnv::new();

    env.command_bare()
        .env("MAITRE_DATA_DIR", &env.data_dir)
        .args(["category", "add", "Main", "--min", "1", "--max", "8"])
        .assert()
        .success();

    assert!(env.data_dir.join("maitre.db").exists());
    assert_eq!(env.json(&["category", "list"]).len(), 1);
}

#[test]
fn test_busy_timeout_flag_accepted() {
    let env = TestEnv::new();
    env.command()
        .args(["--busy-timeout", "1", "table", "list"])
        .assert()
        .success();
}

#[test]
fn test_config_file_sets_booking_defaults() {
    let env = TestEnv::new();
    fs::create_dir_all(&env.data_dir).unwrap();
    fs::write(
        env.data_dir.join("config.yaml"),
        "booking:\n  default_duration_minutes: 60\n  initial_status: confirmed\n",
    )
    .unwrap();
    let table = env.seed_tables(&[4])[0];

    let first = env.book(1, table, "18:00", 2);
    // One hour later no longer overlaps
    env.book(2, table, "19:00", 2);

    let rows = env.json(&["reservations", "--customer", "1"]);
    assert_eq!(rows[0]["id"], first);
    assert_eq!(rows[0]["duration_minutes"], 60);
    assert_eq!(rows[0]["status"], "CONFIRMED");
}

#[test]
fn test_environment_overrides_config_file() {
    let env = TestEnv::new();
    fs::create_dir_all(&env.data_dir).unwrap();
    fs::write(
        env.data_dir.join("config.yaml"),
        "waitlist:\n  default_wait_minutes: 30\n",
    )
    .unwrap();

    env.command()
        .env("MAITRE_DEFAULT_WAIT_MINUTES", "45")
        .args(["waitlist", "join", "--customer", "1", "--date", DATE])
        .args(["--time", "19:00", "--party", "2"])
        .assert()
        .success();
    env.join(2, "19:00", 2);

    let waits: Vec<i64> = env
        .json(&["waitlist", "list"])
        .iter()
        .map(|e| e["wait_minutes"].as_i64().unwrap())
        .collect();
    assert_eq!(waits, vec![45, 30]);
}

#[test]
fn test_initial_status_from_environment() {
    let env = TestEnv::new();
    let table = env.seed_tables(&[4])[0];

    let id = env
        .command()
        .env("MAITRE_INITIAL_STATUS", "confirmed")
        .args(["book", "--customer", "1", "--date", DATE, "--time", "18:00"])
        .args(["--party", "2", "--table", &table.to_string()])
        .output()
        .unwrap();
    assert!(id.status.success());

    let rows = env.json(&["reservations", "--customer", "1"]);
    assert_eq!(rows[0]["status"], "CONFIRMED");
}
