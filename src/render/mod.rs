//! Text rendering of the application pages.

pub mod pages;
pub mod table;
pub mod widgets;

use std::path::Path;

use chrono::NaiveDateTime;

use crate::core::state::{AppState, Page};
use crate::currency::CurrencyFormat;

/// Inputs a page needs besides the state itself.
pub struct RenderContext<'a> {
    pub currency: &'a CurrencyFormat,
    pub now: NaiveDateTime,
    pub data_dir: Option<&'a Path>,
}

/// Renders the active page of `state`.
pub fn render_page(state: &AppState, ctx: &RenderContext<'_>) -> String {
    tracing::debug!(page = %state.page, "rendering page");
    let body = match state.page {
        Page::Usage => pages::usage(),
        Page::Entry => pages::entry(state, ctx),
        Page::Dashboard => pages::dashboard(state, ctx),
        Page::Categories => pages::categories(state),
        Page::About => pages::about(ctx),
    };
    format!("{}\n{}", widgets::heading(state.page.title()), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Expense;
    use chrono::NaiveDate;

    fn ctx(currency: &CurrencyFormat) -> RenderContext<'_> {
        RenderContext {
            currency,
            now: NaiveDate::from_ymd_opt(2024, 6, 15)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            data_dir: None,
        }
    }

    #[test]
    fn entry_page_offers_sample_data_when_empty() {
        let mut state = AppState::default();
        state.page = Page::Entry;
        let currency = CurrencyFormat::default();
        let out = render_page(&state, &ctx(&currency));
        assert!(out.contains("Expenses"));
        assert!(out.contains("data sample"));
    }

    #[test]
    fn entry_page_lists_newest_first_with_amounts() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut state = AppState::default();
        state.expenses.push(Expense::new(date, "Food", "older", 12.5));
        state.expenses.push(Expense::new(date, "Bills", "newer", 1234.5));
        state.page = Page::Entry;
        let currency = CurrencyFormat::default();
        let out = render_page(&state, &ctx(&currency));
        assert!(out.contains("$12.50"));
        assert!(out.contains("$1,234.50"));
        assert!(out.find("newer").unwrap() < out.find("older").unwrap());
    }

    #[test]
    fn dashboard_shows_insight_and_empty_state() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let mut state = AppState::default();
        state.page = Page::Dashboard;
        let currency = CurrencyFormat::default();

        let empty = render_page(&state, &ctx(&currency));
        assert!(empty.contains("No data to show"));

        state.expenses.push(Expense::new(date, "Food", "", 10.0));
        state.expenses.push(Expense::new(date, "Transport", "", 30.0));
        let out = render_page(&state, &ctx(&currency));
        assert!(out.contains("Transport is the top category (75.0% of period)"));
        assert!(out.contains("$40.00"));
    }

    #[test]
    fn categories_page_honours_the_search_query() {
        let mut state = AppState::default();
        state.page = Page::Categories;
        state.category_query = Some("ill".into());
        let currency = CurrencyFormat::default();
        let out = render_page(&state, &ctx(&currency));
        assert!(out.contains("Bills"));
        assert!(!out.contains("Transport"));
    }
}
