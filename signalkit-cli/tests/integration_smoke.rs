//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

/// Command isolated from any developer .env or DATABASE_URL.
fn signalkit(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("signalkit").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("DATABASE_URL");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    signalkit(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("recent"));
}

#[test]
fn test_serve_help() {
    let home = tempfile::tempdir().unwrap();
    signalkit(&home)
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--cors-permissive"))
        .stdout(predicate::str::contains("--in-memory"));
}

#[test]
fn test_recent_help() {
    let home = tempfile::tempdir().unwrap();
    signalkit(&home)
        .arg("recent")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Only these symbols"));
}

#[test]
fn test_insert_rejects_bad_side_before_connecting() {
    let home = tempfile::tempdir().unwrap();
    signalkit(&home)
        .args(["insert", "--symbol", "BTC", "--side", "hold", "--price", "50000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid side value: 'hold'"));
}

#[test]
fn test_count_requires_database_url() {
    let home = tempfile::tempdir().unwrap();
    signalkit(&home)
        .arg("count")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_dotenv_in_working_directory_is_read() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join(".env"),
        "DATABASE_URL=postgres://signalkit@localhost:5432/signalkit\nSIGNALKIT_POOL_MAX=oops\n",
    )
    .unwrap();

    // The bad pool size from .env proves the file was loaded
    signalkit(&home)
        .arg("count")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SIGNALKIT_POOL_MAX"));
}

#[test]
fn test_debug_reports_loaded_dotenv() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join(".env"), "SIGNALKIT_POOL_MAX=oops\n").unwrap();

    signalkit(&home)
        .env_remove("RUST_LOG")
        .args(["--debug", "count"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Loaded .env from"));
}
