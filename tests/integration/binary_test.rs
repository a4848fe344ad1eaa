//! End-to-end tests of the rds-setup binary.

use std::path::Path;
use std::process::Command;

/// Runs the binary with the given arguments and a clean Data API environment.
fn run(args: &[&str], config_dir: &Path) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_rds-setup"))
        .args(args)
        .arg("--config")
        .arg(config_dir.join("config.toml"))
        .current_dir(config_dir)
        .env_remove("RDS_CLUSTER_ARN")
        .env_remove("RDS_SECRET_ARN")
        .env_remove("RDS_DATABASE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

#[test]
fn test_no_args_prints_summary_and_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(&[], dir.path());

    assert_eq!(code, 0);
    assert!(stdout.lines().count() > 1);
    assert!(stdout.contains("=== Database Setup Summary ==="));
}

#[test]
fn test_sql_without_cluster_arn_fails_with_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run(&["--sql", "SELECT 1"], dir.path());

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Cluster ARN is required"));
}

#[test]
fn test_malformed_env_file_is_reported_but_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "RDS_CLUSTER_ARN='unterminated\n").unwrap();

    let (code, stdout, stderr) = run(&[], dir.path());

    assert_eq!(code, 0);
    assert!(stdout.contains("=== Database Setup Summary ==="));
    assert!(stderr.contains("Failed to load .env"));
}
