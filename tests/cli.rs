//! End-to-end tests for the nameswap binary

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run nameswap in `dir` and capture output
fn run_nameswap(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_nameswap"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute nameswap");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn renames_default_columns() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("campers.csv"),
        "First Name,Last Name,Cabin\nJane,Smith,Oak\nJohn,Smith,Pine\n",
    )
    .unwrap();

    let (stdout, _stderr, exit_code) =
        run_nameswap(dir.path(), &["-f", "campers.csv", "-s", "7", "--skip"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Success"));

    let out = fs::read_to_string(dir.path().join("renamed-campers.csv")).unwrap();
    let rows: Vec<Vec<&str>> = out.lines().map(|l| l.split(',').collect()).collect();
    assert_eq!(rows[0], vec!["First Name", "Last Name", "Cabin"]);
    assert_eq!(rows.len(), 3);
    assert!(!rows[1][0].is_empty());
    assert_eq!(rows[1][1], rows[2][1]);
    assert_eq!(rows[1][2], "Oak");
}

#[test]
fn same_seed_same_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.csv"), "Camper\nSmith, Jane-Ann\nLee\n").unwrap();

    run_nameswap(dir.path(), &["-f", "a.csv", "-s", "abc", "-p", "one", "--skip"]);
    run_nameswap(dir.path(), &["-f", "a.csv", "-s", "abc", "-p", "two", "--skip"]);

    let one = fs::read_to_string(dir.path().join("one-a.csv")).unwrap();
    let two = fs::read_to_string(dir.path().join("two-a.csv")).unwrap();
    assert_eq!(one, two);

    let lines: Vec<&str> = one.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Camper");
    assert!(lines[1].contains(", "), "{}", lines[1]);
    assert!(lines[1].contains('-'), "{}", lines[1]);
}

#[test]
fn session_keeps_mappings_across_runs() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.csv"), "Camper\nSmith\n").unwrap();
    fs::write(dir.path().join("b.csv"), "Camper\nJones\nSmith\n").unwrap();

    let (_, _, code) = run_nameswap(
        dir.path(),
        &["-f", "a.csv", "--session", "map.json", "--skip"],
    );
    assert_eq!(code, 0);
    assert!(dir.path().join("map.json").exists());

    let (_, _, code) = run_nameswap(
        dir.path(),
        &["-f", "b.csv", "--session", "map.json", "--skip"],
    );
    assert_eq!(code, 0);

    let a = fs::read_to_string(dir.path().join("renamed-a.csv")).unwrap();
    let b = fs::read_to_string(dir.path().join("renamed-b.csv")).unwrap();
    let smith_a = a.lines().nth(1).unwrap();
    let smith_b = b.lines().nth(2).unwrap();
    assert_eq!(smith_a, smith_b);

    let session: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("map.json")).unwrap()).unwrap();
    assert_eq!(session["mappings"].as_object().unwrap().len(), 2);
}

#[test]
fn malformed_session_aborts() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.csv"), "Camper\nSmith\n").unwrap();
    fs::write(
        dir.path().join("map.json"),
        r#"{"seed": "1", "rename_whole_cells": false}"#,
    )
    .unwrap();

    let (_, stderr, code) = run_nameswap(
        dir.path(),
        &["-f", "a.csv", "--session", "map.json", "--skip"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("mappings"), "{}", stderr);
    assert!(!dir.path().join("renamed-a.csv").exists());
}

#[test]
fn no_valid_files_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_nameswap(dir.path(), &["-f", "missing.csv", "--skip"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("No valid files"), "{}", stderr);
}

#[test]
fn flag_without_argument_fails() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_nameswap(dir.path(), &["-f"]);
    assert_ne!(code, 0);
}

#[test]
fn unmatched_columns_reported_but_not_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.csv"), "Id,Age\n1,2\n").unwrap();
    fs::write(dir.path().join("b.csv"), "Camper\nSmith\n").unwrap();

    let (stdout, _, code) = run_nameswap(
        dir.path(),
        &["-f", "a.csv", "-f", "b.csv", "-c", "camper", "--skip"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("No name columns to modify"));
    assert!(!dir.path().join("renamed-a.csv").exists());
    assert!(dir.path().join("renamed-b.csv").exists());
}

#[test]
fn session_settings_reported_before_processing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.csv"), "Camper\nSmith\n").unwrap();
    fs::write(
        dir.path().join("map.json"),
        r#"{"seed": "9", "rename_whole_cells": false, "mappings": {"Lee": "Olivia"}}"#,
    )
    .unwrap();

    let (stdout, _, code) = run_nameswap(
        dir.path(),
        &["-f", "a.csv", "-s", "5", "--renamewholecells", "--session", "map.json", "--skip"],
    );
    assert_eq!(code, 0);

    let processing = stdout.find("Processing").expect("no processing line");
    let seed_warning = stdout
        .find("session seed '9' overrides requested seed '5'")
        .expect("no seed warning");
    let mode_warning = stdout.find("segment mode").expect("no mode warning");
    assert!(seed_warning < processing);
    assert!(mode_warning < processing);
    assert!(stdout.contains("Seed: 9"), "{}", stdout);
    assert!(stdout.contains("Mode: segment"), "{}", stdout);
    assert!(stdout.contains("(resuming 1 mappings)"), "{}", stdout);

    let session: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("map.json")).unwrap()).unwrap();
    assert_eq!(session["seed"], "9");
    assert_eq!(session["rename_whole_cells"], false);
    assert_eq!(session["mappings"]["Lee"], "Olivia");
}

#[test]
fn random_seed_shown_in_report() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.csv"), "Camper\nSmith\n").unwrap();

    let (stdout, _, code) = run_nameswap(dir.path(), &["-f", "a.csv", "--skip"]);
    assert_eq!(code, 0);
    let seed_line = stdout
        .lines()
        .find(|l| l.starts_with("Seed: "))
        .expect("no seed in report");
    assert!(seed_line["Seed: ".len()..].parse::<u32>().is_ok());
    assert!(stdout.contains("No columns specified, applying default columns"));
}
