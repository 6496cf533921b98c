#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the registry-server binary: help output,
//! configuration validation and the print-config path.

use std::process::{Command, Stdio};

use tempfile::TempDir;

fn run_registry_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_registry-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to execute registry-server")
}

#[test]
fn test_cli_help_command() {
    let output = run_registry_server(&["--help"]);

    assert!(output.status.success(), "help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("registry-server"),
        "should contain binary name"
    );
    assert!(
        stdout.contains("Usage:") || stdout.contains("USAGE:"),
        "should contain usage information"
    );
    assert!(stdout.contains("run"), "should list the run subcommand");
    assert!(stdout.contains("check"), "should list the check subcommand");
}

#[test]
fn test_check_with_valid_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("registry.yaml");
    std::fs::write(
        &path,
        "server:\n  bind_addr: 127.0.0.1:0\ndatabase:\n  dsn: sqlite::memory:\n",
    )
    .unwrap();

    let output = run_registry_server(&["--config", path.to_str().unwrap(), "check"]);

    assert!(output.status.success(), "check should accept a valid config");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration OK"));
}

#[test]
fn test_check_rejects_missing_config_file() {
    let output = run_registry_server(&["--config", "/definitely/not/there.yaml", "check"]);

    assert!(!output.status.success(), "missing config file should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file does not exist"));
}

#[test]
fn test_check_rejects_unknown_config_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("registry.yaml");
    std::fs::write(&path, "server:\n  bindaddr: 127.0.0.1:0\n").unwrap();

    let output = run_registry_server(&["--config", path.to_str().unwrap(), "check"]);
    assert!(
        !output.status.success(),
        "unknown configuration keys should fail validation"
    );
}

#[test]
fn test_print_config_shows_effective_configuration() {
    let output = run_registry_server(&["--print-config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Effective configuration:"));
    assert!(stdout.contains("bind_addr"));
    assert!(stdout.contains("dsn"));
}

#[test]
fn test_port_override_appears_in_printed_config() {
    let output = run_registry_server(&["--port", "9123", "--print-config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("127.0.0.1:9123"));
}
