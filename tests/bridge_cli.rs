//! End-to-end tests against the built binary.
//!
//! The bridge's stdio is piped here, so stdin is not a terminal: the
//! mode manager must stay a no-op and the relay must still work.

#![cfg(unix)]

use std::io::Write;
use std::process::{Command, Stdio};

fn bridge() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ptybridge"))
}

#[test]
fn mirrors_child_output_and_exit_code() {
    let output = bridge()
        .args(["sh", "-c", "printf 'done'; exit 42"])
        .stdin(Stdio::null())
        .output()
        .expect("bridge runs");

    assert_eq!(output.status.code(), Some(42));
    assert!(String::from_utf8_lossy(&output.stdout).contains("done"));
}

#[test]
fn forwards_hyphenated_args_unmodified() {
    let output = bridge()
        .args(["echo", "-n", "hi"])
        .stdin(Stdio::null())
        .output()
        .expect("bridge runs");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("hi"));
}

#[test]
fn relays_stdin_to_child() {
    let mut child = bridge()
        .args(["sh", "-c", "read line; printf 'got:%s' \"$line\""])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("bridge runs");

    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(b"ping\n")
        .expect("write to bridge stdin");

    let output = child.wait_with_output().expect("bridge exits");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("got:ping"));
}

#[test]
fn unknown_command_fails_before_any_session() {
    let output = bridge()
        .arg("definitely-not-a-real-command-0xb1d6e")
        .stdin(Stdio::null())
        .output()
        .expect("bridge runs");

    assert_eq!(output.status.code(), Some(127));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("command not found"));
    // One diagnostic line, not a backtrace dump.
    assert_eq!(stderr.lines().count(), 1);
}
