use chrono::NaiveDateTime;

use crate::chart::{render_chart, ChartImage, ChartKind};
use crate::core::model::compute_total;
use crate::core::period::Period;
use crate::core::services::summary_service::to_series;
use crate::core::services::{CategoryTotal, SummaryService};
use crate::core::state::AppState;
use crate::currency::CurrencyFormat;

pub const REPORT_TITLE: &str = "BudgetWise — Expense Report";

/// One of the headline figures shown under the report header.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryFigure {
    pub title: &'static str,
    pub hint: &'static str,
    pub amount: f64,
    /// Start and end of the box gradient.
    pub colors: (&'static str, &'static str),
}

/// Everything that goes into an exported report, before layout.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub generated_at: NaiveDateTime,
    pub all_time_total: f64,
    pub figures: Vec<SummaryFigure>,
    pub chart: Option<ChartImage>,
    /// All-time totals per category, largest first.
    pub rows: Vec<CategoryTotal>,
    pub expense_count: usize,
    pub currency: CurrencyFormat,
}

impl ReportDocument {
    /// Assembles the report from the current state.
    ///
    /// The cached dashboard chart is reused when it is still valid. Otherwise a
    /// throwaway pie of all-time totals is drawn. Without expenses there is no
    /// chart section.
    pub fn build(state: &AppState, now: NaiveDateTime, currency: &CurrencyFormat) -> Self {
        let expenses = &state.expenses;
        let figures = vec![
            SummaryFigure {
                title: "This month",
                hint: "Sum for this month",
                amount: SummaryService::period_total(expenses, Period::Month, now),
                colors: ("#0c7a4a", "#36b37e"),
            },
            SummaryFigure {
                title: "Last 7 days",
                hint: "Sum for last 7 days",
                amount: SummaryService::period_total(expenses, Period::LastSevenDays, now),
                colors: ("#ff7aa2", "#ff6b6b"),
            },
            SummaryFigure {
                title: "This year",
                hint: "Sum for this year",
                amount: SummaryService::period_total(expenses, Period::Year, now),
                colors: ("#ffb04c", "#ffda79"),
            },
        ];

        let rows = SummaryService::ranked(expenses, &state.categories, now);
        let chart = Self::capture_chart(state, &rows);

        Self {
            generated_at: now,
            all_time_total: compute_total(expenses),
            figures,
            chart,
            rows,
            expense_count: expenses.len(),
            currency: currency.clone(),
        }
    }

    fn capture_chart(state: &AppState, rows: &[CategoryTotal]) -> Option<ChartImage> {
        if let Some(cached) = &state.last_chart {
            match cached.validate() {
                Ok(()) => return Some(cached.clone()),
                Err(err) => tracing::warn!(error = %err, "cached chart unusable; redrawing"),
            }
        }
        if rows.is_empty() {
            return None;
        }
        match render_chart(ChartKind::Pie, &to_series(rows)) {
            Ok(image) => Some(image),
            Err(err) => {
                tracing::warn!(error = %err, "chart capture failed; exporting without chart");
                None
            }
        }
    }

    pub fn money(&self, amount: f64) -> String {
        self.currency.format(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Expense;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn state_with(expenses: &[(&str, f64, (i32, u32, u32))]) -> AppState {
        let mut state = AppState::default();
        for (category, amount, (y, m, d)) in expenses {
            let date = NaiveDate::from_ymd_opt(*y, *m, *d).unwrap();
            state.expenses.push(Expense::new(date, *category, "", *amount));
        }
        state
    }

    #[test]
    fn figures_and_rows_follow_the_expense_list() {
        let state = state_with(&[
            ("Food", 10.0, (2024, 6, 14)),
            ("Bills", 100.0, (2024, 2, 1)),
            ("Food", 5.0, (2023, 12, 31)),
        ]);
        let doc = ReportDocument::build(&state, now(), &CurrencyFormat::default());
        assert_eq!(doc.all_time_total, 115.0);
        assert_eq!(doc.figures[0].amount, 10.0);
        assert_eq!(doc.figures[1].amount, 10.0);
        assert_eq!(doc.figures[2].amount, 110.0);
        assert_eq!(doc.rows[0].name, "Bills");
        assert_eq!(doc.rows[1].total, 15.0);
        assert_eq!(doc.expense_count, 3);
    }

    #[test]
    fn chart_is_synthesized_when_nothing_is_cached() {
        let state = state_with(&[("Food", 10.0, (2020, 1, 1))]);
        let doc = ReportDocument::build(&state, now(), &CurrencyFormat::default());
        let chart = doc.chart.expect("fallback chart");
        assert_eq!(chart.kind, ChartKind::Pie);
    }

    #[test]
    fn cached_chart_is_reused() {
        let mut state = state_with(&[("Food", 10.0, (2024, 6, 14))]);
        state.last_chart = Some(
            render_chart(ChartKind::Bar, &to_series(&SummaryService::ranked(
                &state.expenses,
                &state.categories,
                now(),
            )))
            .unwrap(),
        );
        let doc = ReportDocument::build(&state, now(), &CurrencyFormat::default());
        assert_eq!(doc.chart.unwrap().kind, ChartKind::Bar);
    }

    #[test]
    fn no_expenses_means_no_chart() {
        let doc = ReportDocument::build(&AppState::default(), now(), &CurrencyFormat::default());
        assert!(doc.chart.is_none());
        assert!(doc.rows.is_empty());
        assert_eq!(doc.money(doc.all_time_total), "$0.00");
    }
}
