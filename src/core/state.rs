//! Explicit application state, owned by [`crate::core::app::BudgetApp`].

use std::{fmt, str::FromStr};

use uuid::Uuid;

use crate::chart::{ChartImage, ChartKind};
use crate::core::period::Period;
use crate::domain::{default_categories, Category, Expense};
use crate::errors::BudgetError;

/// Named views of the application. Switching pages is the only routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Usage,
    Entry,
    Dashboard,
    Categories,
    About,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Usage,
        Page::Entry,
        Page::Dashboard,
        Page::Categories,
        Page::About,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Usage => "usage",
            Page::Entry => "entry",
            Page::Dashboard => "dashboard",
            Page::Categories => "categories",
            Page::About => "about",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Usage => "How to use BudgetWise",
            Page::Entry => "Expenses",
            Page::Dashboard => "Dashboard",
            Page::Categories => "Categories",
            Page::About => "About",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Page::ALL
            .into_iter()
            .find(|page| page.as_str() == needle)
            .ok_or_else(|| {
                BudgetError::validation(format!(
                    "unknown page `{}` (use usage, entry, dashboard, categories, or about)",
                    value
                ))
            })
    }
}

/// Everything the running application knows.
#[derive(Debug, Clone)]
pub struct AppState {
    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
    /// Expense currently loaded into the form.
    pub editing: Option<Uuid>,
    pub page: Page,
    pub period: Period,
    pub chart_kind: ChartKind,
    /// Last filter typed on the categories page.
    pub category_query: Option<String>,
    /// Snapshot of the most recent dashboard chart, reused by report export.
    pub last_chart: Option<ChartImage>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(default_categories(), Vec::new())
    }
}

impl AppState {
    pub fn new(categories: Vec<Category>, expenses: Vec<Expense>) -> Self {
        Self {
            categories,
            expenses,
            editing: None,
            page: Page::default(),
            period: Period::default(),
            chart_kind: ChartKind::default(),
            category_query: None,
            last_chart: None,
        }
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    /// Expenses in display order: most recently added first.
    pub fn expenses_newest_first(&self) -> Vec<&Expense> {
        self.expenses.iter().rev().collect()
    }

    pub fn category_refs(&self) -> Vec<&Category> {
        self.categories.iter().collect()
    }

    pub fn editing_expense(&self) -> Option<&Expense> {
        self.editing.and_then(|id| self.expense(id))
    }
}
