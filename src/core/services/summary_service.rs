use chrono::NaiveDateTime;

use crate::chart::ChartSeries;
use crate::core::model::{compute_total, resolve_category};
use crate::core::period::{filter_by_period, Period};
use crate::domain::{Category, Expense, DEFAULT_COLOR};

/// Summed amount for one category name.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
    pub color: String,
}

/// Largest category of a period and its share of the period total.
#[derive(Debug, Clone, PartialEq)]
pub struct TopCategory {
    pub name: String,
    pub total: f64,
    pub percent: f64,
}

/// Everything the dashboard shows for one period selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub period: Period,
    pub breakdown: Vec<CategoryTotal>,
    pub period_total: f64,
    pub top: Option<TopCategory>,
    /// Sum over every expense, independent of the period.
    pub all_time_total: f64,
}

impl DashboardView {
    /// True when there is nothing to chart for the period.
    pub fn is_empty(&self) -> bool {
        self.breakdown.is_empty() || self.period_total == 0.0
    }

    pub fn chart_series(&self) -> Vec<ChartSeries> {
        to_series(&self.breakdown)
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Groups expenses by category name in first-seen order, summing amounts.
    pub fn breakdown(
        expenses: &[Expense],
        categories: &[Category],
        period: Option<Period>,
        now: NaiveDateTime,
    ) -> Vec<CategoryTotal> {
        let filtered = filter_by_period(expenses, period, now);
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for expense in &filtered {
            match totals.iter_mut().find(|entry| entry.name == expense.category) {
                Some(entry) => entry.total += expense.counted_amount(),
                None => totals.push(CategoryTotal {
                    name: expense.category.clone(),
                    total: expense.counted_amount(),
                    color: resolve_category(categories, &expense.category)
                        .map(|category| category.color.clone())
                        .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
                }),
            }
        }
        totals
    }

    /// The maximum entry; the earliest wins ties.
    pub fn top_category(breakdown: &[CategoryTotal]) -> Option<TopCategory> {
        let total: f64 = breakdown.iter().map(|entry| entry.total).sum();
        if total <= 0.0 {
            return None;
        }
        let mut best: Option<&CategoryTotal> = None;
        for entry in breakdown {
            if best.map_or(true, |current| entry.total > current.total) {
                best = Some(entry);
            }
        }
        best.map(|entry| TopCategory {
            name: entry.name.clone(),
            total: entry.total,
            percent: entry.total / total * 100.0,
        })
    }

    pub fn dashboard(
        expenses: &[Expense],
        categories: &[Category],
        period: Period,
        now: NaiveDateTime,
    ) -> DashboardView {
        let breakdown = Self::breakdown(expenses, categories, Some(period), now);
        let period_total = breakdown.iter().map(|entry| entry.total).sum();
        let top = Self::top_category(&breakdown);
        DashboardView {
            period,
            breakdown,
            period_total,
            top,
            all_time_total: compute_total(expenses),
        }
    }

    /// All-time breakdown sorted by descending total, as listed in reports.
    pub fn ranked(expenses: &[Expense], categories: &[Category], now: NaiveDateTime) -> Vec<CategoryTotal> {
        let mut rows = Self::breakdown(expenses, categories, None, now);
        rows.sort_by(|a, b| b.total.total_cmp(&a.total));
        rows
    }

    pub fn period_total(expenses: &[Expense], period: Period, now: NaiveDateTime) -> f64 {
        compute_total(&filter_by_period(expenses, Some(period), now))
    }
}

pub fn to_series(breakdown: &[CategoryTotal]) -> Vec<ChartSeries> {
    breakdown
        .iter()
        .map(|entry| ChartSeries {
            label: entry.name.clone(),
            value: entry.total,
            color: entry.color.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_categories;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn expense(category: &str, amount: f64, date: (i32, u32, u32)) -> Expense {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        Expense::new(date, category, "", amount)
    }

    #[test]
    fn top_category_reports_share_of_period() {
        let expenses = vec![
            expense("Food", 10.0, (2024, 6, 15)),
            expense("Transport", 30.0, (2024, 6, 15)),
        ];
        let view = SummaryService::dashboard(&expenses, &default_categories(), Period::Month, now());
        let top = view.top.expect("top category");
        assert_eq!(top.name, "Transport");
        assert_eq!(format!("{:.1}", top.percent), "75.0");
        assert_eq!(view.breakdown[1].color, "#4CC9F0");
    }

    #[test]
    fn all_time_total_ignores_period() {
        let expenses = vec![
            expense("Food", 10.0, (2024, 6, 15)),
            expense("Food", 5.0, (2020, 1, 1)),
        ];
        let view = SummaryService::dashboard(&expenses, &default_categories(), Period::Month, now());
        assert_eq!(view.period_total, 10.0);
        assert_eq!(view.all_time_total, 15.0);
    }

    #[test]
    fn empty_period_yields_empty_view() {
        let expenses = vec![expense("Food", 10.0, (2020, 1, 1))];
        let view = SummaryService::dashboard(&expenses, &default_categories(), Period::LastSevenDays, now());
        assert!(view.is_empty());
        assert!(view.top.is_none());
        assert_eq!(view.all_time_total, 10.0);
    }

    #[test]
    fn unknown_names_are_grouped_with_default_color() {
        let expenses = vec![
            expense("Rent", 800.0, (2024, 6, 1)),
            expense("Rent", 50.0, (2024, 6, 2)),
            expense("Food", 20.0, (2024, 6, 3)),
        ];
        let rows = SummaryService::ranked(&expenses, &default_categories(), now());
        assert_eq!(rows[0].name, "Rent");
        assert_eq!(rows[0].total, 850.0);
        assert_eq!(rows[0].color, DEFAULT_COLOR);
        assert_eq!(rows[1].name, "Food");
    }

    #[test]
    fn ties_keep_first_seen_category() {
        let rows = vec![
            CategoryTotal { name: "A".into(), total: 5.0, color: DEFAULT_COLOR.into() },
            CategoryTotal { name: "B".into(), total: 5.0, color: DEFAULT_COLOR.into() },
        ];
        assert_eq!(SummaryService::top_category(&rows).unwrap().name, "A");
    }
}
