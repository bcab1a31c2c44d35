/// Smoke tests to verify the binary runs without panicking
use std::process::Command;

#[test]
fn binary_shows_help() {
    let output = Command::new("cargo")
        .args(["run", "--", "--help"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("termplay"),
        "Help output should mention termplay"
    );
    for sub in ["boids", "life", "mines", "snake", "sort", "noise", "faster", "link"] {
        assert!(stdout.contains(sub), "Help output should list {}", sub);
    }
}

#[test]
fn binary_shows_version() {
    let output = Command::new("cargo")
        .args(["run", "--", "--version"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn link_without_action_is_rejected() {
    let output = Command::new("cargo")
        .args(["run", "--", "link"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        !output.status.success(),
        "link needs an action"
    );
}

#[test]
fn invalid_subcommand_fails_gracefully() {
    let output = Command::new("cargo")
        .args(["run", "--", "nonexistent-command"])
        .output()
        .expect("Failed to execute cargo run");

    // Should fail with error, not panic
    assert!(
        !output.status.success(),
        "Invalid subcommand should return error status"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    // Should show helpful error, not a panic backtrace
    assert!(
        !stderr.contains("panicked at"),
        "Invalid subcommand should not cause panic"
    );
}

#[test]
fn faster_prints_time_saved() {
    let output = Command::new("cargo")
        .args(["run", "--", "faster", "60,80,120", "50,100,50"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "faster failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("00:30:00"), "per-leg time missing: {}", stdout);
    assert!(stdout.contains("01:00:00"), "total missing: {}", stdout);
}

#[test]
fn faster_rejects_malformed_legs() {
    let output = Command::new("cargo")
        .args(["run", "--", "faster", "sixty,80,120"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(!output.status.success(), "non-numeric speed should be rejected");
}
