use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("murmur").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Social feed backend for murmur"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("murmur").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_cli_migrate_reports_version() {
    let temp = tempfile::tempdir().unwrap();
    let db = temp.path().join("social.db");
    let mut cmd = Command::cargo_bin("murmur").unwrap();
    cmd.arg("migrate")
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema at version 5"));
}

#[test]
fn test_cli_rollback_and_stats() {
    let temp = tempfile::tempdir().unwrap();
    let db = temp.path().join("social.db");

    let mut cmd = Command::cargo_bin("murmur").unwrap();
    cmd.arg("rollback")
        .arg("--to")
        .arg("4")
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema at version 4"));

    // re-opening migrates back up; stats shows the full schema
    let mut cmd = Command::cargo_bin("murmur").unwrap();
    cmd.arg("stats")
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"schema_version\": 5"));
}
