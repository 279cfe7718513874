//! Form handling for creating, editing, and deleting expenses.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{CategoryService, ServiceError, ServiceResult};
use crate::core::state::AppState;
use crate::domain::{Category, Expense};

/// Raw text fields of the expense form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub date: String,
    pub category: String,
    pub notes: String,
    pub amount: String,
}

impl ExpenseForm {
    /// Today's date and empty fields.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            date: expense.date.format("%Y-%m-%d").to_string(),
            category: expense.category.clone(),
            notes: expense.notes.clone(),
            amount: format_amount_field(expense.amount),
        }
    }
}

fn format_amount_field(amount: f64) -> String {
    let text = format!("{:.2}", amount);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(Uuid),
    Updated(Uuid),
}

impl SubmitOutcome {
    pub fn id(&self) -> Uuid {
        match self {
            SubmitOutcome::Added(id) | SubmitOutcome::Updated(id) => *id,
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReport {
    pub outcome: SubmitOutcome,
    /// Category auto-created because the typed name was unknown.
    pub created_category: Option<Category>,
}

struct ValidExpense {
    date: NaiveDate,
    category: String,
    notes: String,
    amount: f64,
}

/// Validates and commits expense form operations.
pub struct ExpenseService;

impl ExpenseService {
    /// Creates or updates an expense from the form.
    ///
    /// Updates the expense under the editing cursor when one is set, otherwise
    /// appends. Unknown category names are created with the default color.
    /// Validation failures leave `state` untouched.
    pub fn submit(state: &mut AppState, form: &ExpenseForm) -> ServiceResult<SubmitReport> {
        let valid = Self::validate(form)?;
        let created_category = CategoryService::ensure(state, &valid.category);

        let editing = state.editing.take();
        let outcome = match editing.and_then(|id| state.expense_mut(id)) {
            Some(existing) => {
                existing.date = valid.date;
                existing.category = valid.category;
                existing.notes = valid.notes;
                existing.amount = valid.amount;
                SubmitOutcome::Updated(existing.id)
            }
            None => {
                if let Some(id) = editing {
                    tracing::warn!(%id, "edited expense disappeared; saving as new");
                }
                let expense = Expense::new(valid.date, valid.category, valid.notes, valid.amount);
                let id = expense.id;
                state.expenses.push(expense);
                SubmitOutcome::Added(id)
            }
        };

        Ok(SubmitReport {
            outcome,
            created_category,
        })
    }

    /// Loads an expense into the form and sets the editing cursor.
    pub fn start_edit(state: &mut AppState, id: Uuid) -> Option<ExpenseForm> {
        let form = state.expense(id).map(ExpenseForm::from_expense)?;
        state.editing = Some(id);
        Some(form)
    }

    /// Clears the editing cursor and returns a blank form.
    pub fn cancel_edit(state: &mut AppState, today: NaiveDate) -> ExpenseForm {
        state.editing = None;
        ExpenseForm::blank(today)
    }

    /// Removes an expense. Irreversible; callers confirm first.
    pub fn delete(state: &mut AppState, id: Uuid) -> ServiceResult<Expense> {
        let index = state
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or_else(|| ServiceError::ExpenseNotFound(id.to_string()))?;
        if state.editing == Some(id) {
            state.editing = None;
        }
        Ok(state.expenses.remove(index))
    }

    /// Category names containing `input`, ignoring case. Empty when nothing
    /// should be suggested.
    pub fn suggest<'a>(categories: &'a [Category], input: &str) -> Vec<&'a Category> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        categories
            .iter()
            .filter(|category| category.name.to_lowercase().contains(&needle))
            .collect()
    }

    fn validate(form: &ExpenseForm) -> ServiceResult<ValidExpense> {
        let invalid = || {
            ServiceError::Invalid("Please provide a valid date, category and amount.".into())
        };

        let date = form.date.trim();
        let category = form.category.trim();
        if date.is_empty() || category.is_empty() {
            return Err(invalid());
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
        let amount = parse_amount(&form.amount).ok_or_else(invalid)?;

        Ok(ValidExpense {
            date,
            category: category.to_string(),
            notes: form.notes.clone(),
            amount,
        })
    }
}

/// Parses a positive, finite amount. Accepts a leading `$` and `,` grouping.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let amount = cleaned.parse::<f64>().ok()?;
    (amount.is_finite() && amount > 0.0).then_some(amount)
}
