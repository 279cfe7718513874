//! Time-window predicates applied to the expense list before aggregation.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::Expense;
use crate::errors::BudgetError;

const SECONDS_PER_DAY: f64 = 86_400.0;
const RECENT_DAYS: f64 = 7.0;

/// Selectable dashboard/report window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "7")]
    LastSevenDays,
    #[default]
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "all")]
    All,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::LastSevenDays,
        Period::Month,
        Period::Year,
        Period::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::LastSevenDays => "7",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::LastSevenDays => "Last 7 days",
            Period::Month => "This month",
            Period::Year => "This year",
            Period::All => "All time",
        }
    }

    /// Whether `expense` falls inside this window as seen from `now`.
    ///
    /// Calendar windows compare local month/year fields. The seven-day window
    /// measures elapsed time from the expense date's midnight, so future
    /// dates are inside it.
    pub fn contains(&self, expense: &Expense, now: NaiveDateTime) -> bool {
        let date = expense.date;
        match self {
            Period::All => true,
            Period::LastSevenDays => {
                let start = date.and_hms_opt(0, 0, 0).unwrap_or_default();
                let elapsed = (now - start).num_seconds() as f64 / SECONDS_PER_DAY;
                elapsed <= RECENT_DAYS
            }
            Period::Month => date.month() == now.month() && date.year() == now.year(),
            Period::Year => date.year() == now.year(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "7" => Ok(Period::LastSevenDays),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" | "" => Ok(Period::All),
            other => Err(BudgetError::validation(format!(
                "unknown period `{}` (use 7, month, year, or all)",
                other
            ))),
        }
    }
}

/// Expenses inside `period`, preserving order. `None` means no filtering.
pub fn filter_by_period(
    list: &[Expense],
    period: Option<Period>,
    now: NaiveDateTime,
) -> Vec<Expense> {
    let period = period.unwrap_or(Period::All);
    list.iter()
        .filter(|expense| period.contains(expense, now))
        .cloned()
        .collect()
}
