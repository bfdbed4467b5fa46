//! End-to-end smoke tests for the homesim binary.
//!
//! Each test runs the real executable in a temporary working directory, feeds
//! the menu through stdin and inspects stdout plus the log file it leaves
//! behind.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

struct Run {
    output: Output,
    log_path: PathBuf,
}

impl Run {
    fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    fn log_lines(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log_path)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// Run the binary in `dir` with `input` on stdin.
fn run_in(dir: &Path, input: &str) -> Run {
    run_with_env(dir, input, &[])
}

/// Run the binary in `dir` with `input` on stdin and extra environment.
fn run_with_env(dir: &Path, input: &str, env: &[(&str, &str)]) -> Run {
    let log_path = dir.join("smart_home_log.txt");
    let mut child = Command::new(env!("CARGO_BIN_EXE_homesim"))
        .current_dir(dir)
        .env("HOMESIM_LOG_FILE", &log_path)
        .env("NO_COLOR", "1")
        .env_remove("HOMESIM_CONFIG")
        .env_remove("RUST_LOG")
        .env_remove("HOMESIM_LOG")
        .envs(env.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("homesim binary should start");

    // The binary may exit before reading stdin, e.g. on a bad config.
    let written = child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes());
    if let Err(err) = written {
        assert_eq!(err.kind(), ErrorKind::BrokenPipe, "stdin write failed: {err}");
    }

    let output = child.wait_with_output().expect("homesim should exit");
    Run { output, log_path }
}

fn run(input: &str) -> (tempfile::TempDir, Run) {
    let dir = tempfile::tempdir().unwrap();
    let run = run_in(dir.path(), input);
    (dir, run)
}

// ---------------------------------------------------------------------------
// Start-up and exit
// ---------------------------------------------------------------------------

#[test]
fn should_exit_with_success_after_confirmation() {
    let (_dir, run) = run("6\ny\n");
    assert!(run.output.status.success());
    assert!(run.stdout().contains("Exiting system. Goodbye!"));
}

#[test]
fn should_exit_with_success_when_stdin_closes() {
    let (_dir, run) = run("");
    assert!(run.output.status.success());
    assert!(run.stdout().contains("SMART HOME AUTOMATION SYSTEM"));
}

#[test]
fn should_list_seeded_devices() {
    let (_dir, run) = run("1\n\n6\ny\n");
    let stdout = run.stdout();
    assert!(stdout.contains("1. Living Room Light"));
    assert!(stdout.contains("7. Home Thermostat"));
}

#[test]
fn should_fail_when_config_file_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("homesim.toml"), "devices = {{{").unwrap();
    let run = run_in(dir.path(), "6\ny\n");
    assert!(!run.output.status.success());
    let stderr = String::from_utf8_lossy(&run.output.stderr);
    assert!(stderr.contains("failed to load configuration"));
}

#[test]
fn should_warn_and_fall_back_when_log_filter_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("homesim.toml"),
        "[logging]\nfilter = 'homesim=bogus'\n",
    )
    .unwrap();
    let run = run_in(dir.path(), "6\ny\n");
    assert!(run.output.status.success());
    let stderr = String::from_utf8_lossy(&run.output.stderr);
    assert!(stderr.contains("invalid log filter, using fallback"));
}

#[test]
fn should_trace_device_snapshots_at_debug_level() {
    let dir = tempfile::tempdir().unwrap();
    let run = run_with_env(dir.path(), "6\ny\n", &[("HOMESIM_LOG", "homesim=debug")]);
    let stderr = String::from_utf8_lossy(&run.output.stderr);
    assert!(stderr.contains(r#""name":"Home Thermostat","is_on":false,"kind":"thermostat""#));
}

#[test]
fn should_use_devices_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("homesim.toml"),
        "[[devices]]\nkind = 'fan'\nname = 'Attic Fan'\n",
    )
    .unwrap();
    let run = run_in(dir.path(), "1\n\n6\ny\n");
    assert!(run.stdout().contains("1. Attic Fan"));
    assert!(!run.stdout().contains("Living Room Light"));
}

// ---------------------------------------------------------------------------
// Device control and the action log
// ---------------------------------------------------------------------------

#[test]
fn should_log_adjustment_of_light() {
    let (_dir, run) = run("2\n1\n2\n70\n\n6\ny\n");
    assert!(run.stdout().contains("Living Room Light brightness set to 70%."));
    assert_eq!(
        run.log_lines(),
        vec!["Living Room Light: Adjusted setting to 70"]
    );
}

#[test]
fn should_log_rejected_adjustment_attempt() {
    let (_dir, run) = run("2\n7\n2\n45\n\n6\ny\n");
    assert!(run
        .stdout()
        .contains("invalid temperature 45: must be between 16 and 30"));
    assert_eq!(
        run.log_lines(),
        vec!["Home Thermostat: Adjusted setting to 45"]
    );
}

#[test]
fn should_not_log_invalid_device_number() {
    let (_dir, run) = run("2\n99\n\n6\ny\n");
    assert!(run
        .stdout()
        .contains("invalid device number 99: expected 1 to 7"));
    assert!(run.log_lines().is_empty());
}

#[test]
fn should_log_single_entry_when_resetting_idle_home() {
    let (_dir, run) = run("5\n\n6\ny\n");
    assert_eq!(run.log_lines(), vec!["System: All devices reset to OFF"]);
}

#[test]
fn should_append_across_runs_then_clear() {
    let dir = tempfile::tempdir().unwrap();
    run_in(dir.path(), "2\n3\n1\n\n6\ny\n");
    let second = run_in(dir.path(), "2\n3\n1\n\n3\n\n6\ny\n");

    assert_eq!(
        second.log_lines(),
        vec!["Living Room Fan: Toggled ON", "Living Room Fan: Toggled ON"]
    );
    assert!(second.stdout().contains("Living Room Fan: Toggled ON"));

    let third = run_in(dir.path(), "4\n\n4\n\n6\ny\n");
    let stdout = third.stdout();
    assert!(stdout.contains("Log file cleared successfully."));
    assert!(stdout.contains("No logs found. Log file is already empty."));
    assert!(third.log_lines().is_empty());
}
