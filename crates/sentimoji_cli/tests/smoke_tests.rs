//! CLI smoke tests covering basic binary behavior.

use std::process::Command;

fn cli_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sentimoji"))
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage"),
        "Expected usage info in --help output"
    );
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("sentimoji_cli"),
        "Expected crate name in --version output"
    );
}

#[test]
fn test_one_shot_message() {
    let output = cli_bin()
        .arg("--message")
        .arg("I am so happy today!")
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"emojis\""));
    assert!(stdout.contains("Primary sentiment: happy"));
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let output = cli_bin()
        .arg("--config")
        .arg("/tmp/nonexistent_sentimoji_config_12345.toml")
        .arg("--message")
        .arg("hello")
        .output()
        .expect("failed to run");
    assert!(output.status.success());
}
