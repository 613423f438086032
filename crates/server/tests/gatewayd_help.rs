//! Smoke test for the `gatewayd` binary's `--help` output, grounded on the
//! donor's `tests/specs/daemon/help.rs` (`ojd --help`/`--version` specs).

use assert_cmd::Command;

#[test]
fn gatewayd_help_shows_usage() {
    let assert = Command::cargo_bin("gatewayd").unwrap().arg("--help").assert().success();
    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);

    let usage_line = stdout.lines().find(|line| line.starts_with("Usage:")).unwrap_or_default();
    similar_asserts::assert_eq!(usage_line, "Usage: gatewayd [OPTIONS]");

    assert!(stdout.contains("--port"), "expected --port in output, got: {stdout}");
    assert!(stdout.contains("--auth-token"), "expected --auth-token in output, got: {stdout}");
}
