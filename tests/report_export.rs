mod common;

use std::fs;

use budgetwise::{
    core::{services::ExpenseForm, state::Page, AutoConfirm},
    errors::BudgetError,
    utils::paths,
};
use common::{date, open_app, temp_base};
use regex::Regex;

fn add(app: &mut budgetwise::core::BudgetApp, day: &str, category: &str, amount: &str) {
    app.submit_expense(&ExpenseForm {
        date: day.into(),
        category: category.into(),
        notes: "report test".into(),
        amount: amount.into(),
    })
    .unwrap();
}

fn leftover_staging(dir: &std::path::Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .count()
}

#[test]
fn export_writes_dated_html_report() {
    let base = temp_base();
    let out = temp_base();
    let mut app = open_app(&base, date(2024, 5, 20));
    add(&mut app, "2024-05-18", "Food", "10");
    add(&mut app, "2024-05-19", "Transport", "30");
    app.navigate(Page::Dashboard);

    let path = app.export_report(&out).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    let pattern = Regex::new(r"^BudgetWise-Report-\d{4}-\d{2}-\d{2}\.html$").unwrap();
    assert!(pattern.is_match(&name), "unexpected name {name}");
    assert_eq!(name, "BudgetWise-Report-2024-05-20.html");

    let html = fs::read_to_string(&path).unwrap();
    assert!(html.contains("<svg"));
    assert!(html.contains("Transport"));
    assert!(html.contains("$40.00"));
    assert_eq!(leftover_staging(&out), 0);
}

#[test]
fn export_without_expenses_still_succeeds() {
    let base = temp_base();
    let out = temp_base();
    let app = open_app(&base, date(2024, 5, 20));

    let path = app.export_report(&out).unwrap();
    assert!(path.exists());
    assert_eq!(leftover_staging(&out), 0);
}

#[test]
fn export_into_a_file_path_fails_cleanly() {
    let base = temp_base();
    let blocker = temp_base().join("not-a-dir");
    fs::write(&blocker, "occupied").unwrap();
    let mut app = open_app(&base, date(2024, 5, 20));
    add(&mut app, "2024-05-18", "Food", "10");

    let err = app.export_report(&blocker).unwrap_err();
    assert!(matches!(err, BudgetError::Export(_)));
    assert!(err.to_string().starts_with("Export failed"));
}

#[test]
fn export_never_embeds_a_chart_of_deleted_data() {
    let base = temp_base();
    let out = temp_base();
    let mut app = open_app(&base, date(2024, 5, 20));
    add(&mut app, "2024-05-18", "Food", "10");
    app.navigate(Page::Dashboard);
    app.navigate(Page::Entry);

    let food = app.state().expenses[0].id;
    app.delete_expense(food, &AutoConfirm).unwrap();
    add(&mut app, "2024-05-19", "Transport", "500");

    let html = fs::read_to_string(app.export_report(&out).unwrap()).unwrap();
    assert!(html.contains("<circle"), "report should carry a chart");
    assert!(html.contains("Transport"));
    assert!(!html.contains("Food"));
}

#[test]
fn negative_sample_amounts_keep_the_chart() {
    let base = temp_base();
    let out = temp_base();
    fs::write(
        paths::sample_file_in(&base),
        r#"[
            {"date": "2024-05-18", "category": "Gym", "amount": 10},
            {"date": "2024-05-19", "category": "Refund", "amount": "-5"}
        ]"#,
    )
    .unwrap();
    let mut app = open_app(&base, date(2024, 5, 20));
    app.load_sample();

    let amounts: Vec<f64> = app.state().expenses.iter().map(|e| e.amount).collect();
    assert_eq!(amounts, vec![10.0, 0.0]);

    app.navigate(Page::Dashboard);
    assert!(app.state().last_chart.is_some());

    let html = fs::read_to_string(app.export_report(&out).unwrap()).unwrap();
    assert!(html.contains("<circle"));
}
