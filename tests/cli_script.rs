use std::fs;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use predicates::str::contains;
use regex::Regex;

fn script(home: &TempDir, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("budgetwise")
        .unwrap()
        .env("BUDGETWISE_CLI_SCRIPT", "1")
        .env("BUDGETWISE_HOME", home.path())
        .env("NO_COLOR", "1")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn script_mode_records_expenses() {
    let home = TempDir::new().unwrap();
    script(
        &home,
        "expense add 2024-01-05 Food 12.50 \"corner cafe\"\nexpense list\nexit\n",
    )
    .success()
    .stdout(contains("Expense added."))
    .stdout(contains("$12.50"))
    .stdout(contains("corner cafe"));

    let stored = home.child("store").child("expenses.json");
    stored.assert(predicate::path::exists());
    let json = fs::read_to_string(stored.path()).unwrap();
    assert!(json.contains("\"Food\""));
}

#[test]
fn invalid_input_is_reported_and_the_shell_continues() {
    let home = TempDir::new().unwrap();
    script(
        &home,
        "expense add 2024-01-05 Food zero\ncategory add Travel #00AAFF\nexit\n",
    )
    .success()
    .stdout(contains("ERROR"))
    .stdout(contains("Category \"Travel\" added."));
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let home = TempDir::new().unwrap();
    script(&home, "dashbaord\nexit\n")
        .success()
        .stdout(contains("Unknown command `dashbaord`"))
        .stdout(contains("Suggestion: `dashboard`?"));
}

#[test]
fn report_command_writes_artifact() {
    let home = TempDir::new().unwrap();
    let out = home.child("reports");
    let input = format!(
        "data sample\ndashboard period all chart bar\nreport {}\nexit\n",
        out.path().display()
    );
    script(&home, &input)
        .success()
        .stdout(contains("generated 8 sample expenses"))
        .stdout(contains("Report saved to"));

    let pattern = Regex::new(r"^BudgetWise-Report-\d{4}-\d{2}-\d{2}\.html$").unwrap();
    let names: Vec<String> = fs::read_dir(out.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names.len(), 1, "unexpected files: {names:?}");
    assert!(pattern.is_match(&names[0]));
}

#[test]
fn clear_all_in_script_mode_auto_confirms() {
    let home = TempDir::new().unwrap();
    script(
        &home,
        "expense add 2024-01-05 Food 3\ndata clear\nexit\n",
    )
    .success()
    .stdout(contains("All data cleared."));

    let json = fs::read_to_string(home.child("store").child("expenses.json").path()).unwrap();
    assert_eq!(json.trim(), "[]");
}
