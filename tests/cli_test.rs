#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clinic-locator"))
        .args(args)
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch clinic-locator")
}

#[test]
fn test_missing_api_key_still_prints_registry() {
    let output = run_cli(&["--query", "Cheras"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(matches!(output.status.code(), Some(0) | Some(2)));
    assert!(stdout.contains("Branches (5 active)"));
    assert!(stdout.contains("T.low Dental Clinic (Petaling Jaya)"));
    assert!(!stdout.contains("Target branch summary"));
    assert!(stderr.contains("Travel advice is unavailable"));
}

#[test]
fn test_blank_query_is_rejected_before_advice() {
    let output = run_cli(&["--query", "   "]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(matches!(output.status.code(), Some(0) | Some(2)));
    assert!(stdout.contains("Branches (5 active)"));
    assert!(stderr.contains("Please enter a location to search for."));
    assert!(!stderr.contains("Travel advice is unavailable"));
}

#[test]
fn test_missing_api_key_with_device_position_ranks_branches() {
    let output = run_cli(&["--lat", "3.1167", "--lng", "101.6219"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(matches!(output.status.code(), Some(0) | Some(2)));
    assert!(stdout.contains("1. T.low Dental Clinic (Petaling Jaya) (0 m) ★ NEAREST"));
}
