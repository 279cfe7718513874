//! Interactive expense form.
//!
//! Fields are prompted one after another with dialoguer and prefilled from
//! the form the app hands out (blank, or the expense under the editing
//! cursor). Field checks here only catch obvious typos early; the
//! authoritative validation happens when the form is submitted.

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input};

use crate::cli::core::CommandError;
use crate::cli::io;
use crate::core::services::ExpenseForm;
use crate::core::BudgetApp;

/// Prompts for every field of `initial` and returns the edited form.
pub fn prompt_expense(
    theme: &ColorfulTheme,
    app: &BudgetApp,
    initial: &ExpenseForm,
) -> Result<ExpenseForm, CommandError> {
    let date = Input::<String>::with_theme(theme)
        .with_prompt("Date (YYYY-MM-DD)")
        .with_initial_text(initial.date.clone())
        .validate_with(|value: &String| check_date(value))
        .interact_text()?;

    let category = prompt_category(theme, app, &initial.category)?;
    let notes = io::prompt_text(theme, "Notes", &initial.notes, true)?;

    let amount = Input::<String>::with_theme(theme)
        .with_prompt("Amount")
        .with_initial_text(initial.amount.clone())
        .validate_with(|value: &String| check_amount(value))
        .interact_text()?;

    Ok(ExpenseForm {
        date,
        category,
        notes,
        amount,
    })
}

/// Category prompt that lists matching names for a partial entry.
///
/// Typing a fragment that matches several categories shows the candidates and
/// asks again; a single match is taken as-is. Unknown names are accepted and
/// become new categories on submit.
fn prompt_category(
    theme: &ColorfulTheme,
    app: &BudgetApp,
    initial: &str,
) -> Result<String, CommandError> {
    let mut current = initial.to_string();
    loop {
        let typed = io::prompt_text(theme, "Category", &current, false)?;
        let typed = typed.trim().to_string();
        let matches = app.suggest(&typed);

        if matches.iter().any(|category| category.name == typed) {
            return Ok(typed);
        }
        match matches.as_slice() {
            [] => return Ok(typed),
            [only] => return Ok(only.name.clone()),
            many => {
                let names: Vec<&str> = many.iter().map(|category| category.name.as_str()).collect();
                io::print_hint(format!("Matching categories: {}", names.join(", ")));
                current = typed;
            }
        }
    }
}

fn check_date(value: &str) -> Result<(), String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| "Enter a date as YYYY-MM-DD".to_string())
}

fn check_amount(value: &str) -> Result<(), String> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(()),
        _ => Err("Enter an amount greater than zero".to_string()),
    }
}
