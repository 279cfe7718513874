//! The application object: owns the state, persists every mutation, and
//! re-renders the active page.

use std::{
    io,
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::chart::{render_chart, ChartKind};
use crate::config::Config;
use crate::core::period::Period;
use crate::core::services::{
    CategoryService, DashboardView, ExpenseForm, ExpenseService, FileSampleSource, SampleImport,
    SampleService, SampleSource, SubmitReport, SummaryService,
};
use crate::core::state::{AppState, Page};
use crate::core::time::Clock;
use crate::currency::CurrencyFormat;
use crate::domain::{default_categories, Category, Expense};
use crate::errors::{BudgetError, Result};
use crate::render::{render_page, RenderContext};
use crate::report::{ReportDocument, ReportExporter, SvgRasterizer};
use crate::storage::{Persistence, CATEGORIES_KEY, EXPENSES_KEY};

/// Gate for irreversible operations.
pub trait Confirmer {
    fn confirm(&self, title: &str, detail: &str) -> io::Result<bool>;
}

/// Accepts every prompt; used by script mode and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Confirmer for AutoConfirm {
    fn confirm(&self, _title: &str, _detail: &str) -> io::Result<bool> {
        Ok(true)
    }
}

/// Declines every prompt.
#[derive(Debug, Default, Clone, Copy)]
pub struct Decline;

impl Confirmer for Decline {
    fn confirm(&self, _title: &str, _detail: &str) -> io::Result<bool> {
        Ok(false)
    }
}

pub struct BudgetApp {
    state: AppState,
    persistence: Persistence,
    clock: Box<dyn Clock>,
    currency: CurrencyFormat,
    sample_source: Box<dyn SampleSource>,
    data_dir: Option<PathBuf>,
}

impl BudgetApp {
    /// Loads both keys, reseeding whichever is missing or malformed.
    pub fn open(persistence: Persistence, clock: Box<dyn Clock>) -> Self {
        let (categories, expenses) = load_lists(&persistence);
        tracing::info!(
            categories = categories.len(),
            expenses = expenses.len(),
            "state loaded"
        );
        Self {
            state: AppState::new(categories, expenses),
            persistence,
            clock,
            currency: CurrencyFormat::default(),
            sample_source: Box::new(FileSampleSource::new("budgetwise-sample.json")),
            data_dir: None,
        }
    }

    /// Applies user preferences: currency, default period and chart.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.currency = config.currency_format();
        self.state.period = config.default_period;
        self.state.chart_kind = config.default_chart;
        if let Some(path) = &config.sample_data {
            self.sample_source = Box::new(FileSampleSource::new(path.clone()));
        }
        self
    }

    pub fn with_sample_source(mut self, source: Box<dyn SampleSource>) -> Self {
        self.sample_source = source;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // -- pages ------------------------------------------------------------

    /// Switches page and returns its rendering.
    pub fn navigate(&mut self, page: Page) -> String {
        self.state.page = page;
        self.render()
    }

    /// Renders the active page. The dashboard also refreshes the cached chart.
    pub fn render(&mut self) -> String {
        self.sync_chart();
        let ctx = RenderContext {
            currency: &self.currency,
            now: self.clock.now(),
            data_dir: self.data_dir.as_deref(),
        };
        render_page(&self.state, &ctx)
    }

    /// Keeps the cached chart in step with the data. It only exists while the
    /// dashboard is the active page.
    fn sync_chart(&mut self) {
        if self.state.page == Page::Dashboard {
            self.refresh_chart();
        } else {
            self.state.last_chart = None;
        }
    }

    fn refresh_chart(&mut self) {
        let view = self.dashboard();
        self.state.last_chart = if view.is_empty() {
            None
        } else {
            match render_chart(self.state.chart_kind, &view.chart_series()) {
                Ok(image) => Some(image),
                Err(err) => {
                    tracing::warn!(error = %err, "chart render failed");
                    None
                }
            }
        };
    }

    // -- expenses ---------------------------------------------------------

    pub fn blank_form(&self) -> ExpenseForm {
        ExpenseForm::blank(self.today())
    }

    /// Form prefilled from the editing cursor, or blank.
    pub fn current_form(&self) -> ExpenseForm {
        self.state
            .editing_expense()
            .map(ExpenseForm::from_expense)
            .unwrap_or_else(|| self.blank_form())
    }

    pub fn submit_expense(&mut self, form: &ExpenseForm) -> Result<SubmitReport> {
        let report = ExpenseService::submit(&mut self.state, form)?;
        if let Some(category) = &report.created_category {
            tracing::info!(name = %category.name, "category created from expense form");
            self.save_categories();
        }
        self.save_expenses();
        self.sync_chart();
        tracing::info!(outcome = ?report.outcome, "expense saved");
        Ok(report)
    }

    pub fn start_edit(&mut self, id: Uuid) -> Option<ExpenseForm> {
        let form = ExpenseService::start_edit(&mut self.state, id)?;
        self.state.page = Page::Entry;
        self.state.last_chart = None;
        Some(form)
    }

    pub fn cancel_edit(&mut self) -> ExpenseForm {
        let today = self.today();
        ExpenseService::cancel_edit(&mut self.state, today)
    }

    /// Deletes after confirmation. `Ok(None)` means the user declined.
    pub fn delete_expense(&mut self, id: Uuid, confirmer: &dyn Confirmer) -> Result<Option<Expense>> {
        if self.state.expense(id).is_none() {
            return Err(BudgetError::ExpenseNotFound(id.to_string()));
        }
        if !confirmer.confirm("Delete?", "This will permanently remove the expense.")? {
            return Ok(None);
        }
        let removed = ExpenseService::delete(&mut self.state, id)?;
        self.save_expenses();
        self.sync_chart();
        tracing::info!(%id, "expense deleted");
        Ok(Some(removed))
    }

    pub fn suggest(&self, input: &str) -> Vec<&Category> {
        ExpenseService::suggest(&self.state.categories, input)
    }

    // -- categories -------------------------------------------------------

    pub fn create_category(&mut self, name: &str, color: Option<&str>) -> Result<Uuid> {
        let id = CategoryService::create(&mut self.state, name, color)?;
        self.save_categories();
        self.sync_chart();
        tracing::info!(%id, "category created");
        Ok(id)
    }

    pub fn update_category(&mut self, id: Uuid, name: &str, color: Option<&str>) -> Result<()> {
        CategoryService::update(&mut self.state, id, name, color)?;
        self.save_categories();
        self.sync_chart();
        tracing::info!(%id, "category updated");
        Ok(())
    }

    /// Deletes after confirmation. `Ok(None)` means the user declined.
    pub fn delete_category(&mut self, id: Uuid, confirmer: &dyn Confirmer) -> Result<Option<Category>> {
        let name = self
            .state
            .category(id)
            .map(|category| category.name.clone())
            .ok_or_else(|| BudgetError::CategoryNotFound(id.to_string()))?;
        if self.state.categories.len() <= 1 {
            return Err(BudgetError::validation("Cannot delete last category."));
        }
        let detail = format!("Delete category \"{}\"? Expenses keep their label.", name);
        if !confirmer.confirm("Delete category?", &detail)? {
            return Ok(None);
        }
        let removed = CategoryService::delete(&mut self.state, id)?;
        self.save_categories();
        self.sync_chart();
        tracing::info!(%id, "category deleted");
        Ok(Some(removed))
    }

    /// Filters the categories page; a blank query clears the filter.
    pub fn search_categories(&mut self, query: &str) -> Vec<&Category> {
        let query = query.trim();
        self.state.category_query = (!query.is_empty()).then(|| query.to_string());
        CategoryService::search(&self.state.categories, query)
    }

    // -- dashboard --------------------------------------------------------

    pub fn set_period(&mut self, period: Period) {
        self.state.period = period;
        self.sync_chart();
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.state.chart_kind = kind;
        self.sync_chart();
    }

    pub fn toggle_chart(&mut self) -> ChartKind {
        self.state.chart_kind = self.state.chart_kind.toggled();
        self.sync_chart();
        self.state.chart_kind
    }

    pub fn dashboard(&self) -> DashboardView {
        SummaryService::dashboard(
            &self.state.expenses,
            &self.state.categories,
            self.state.period,
            self.clock.now(),
        )
    }

    // -- data -------------------------------------------------------------

    pub fn load_sample(&mut self) -> SampleImport {
        let today = self.today();
        let import = SampleService::import(&mut self.state, self.sample_source.as_ref(), today);
        self.save_categories();
        self.save_expenses();
        self.sync_chart();
        tracing::info!(count = import.count, origin = ?import.origin, "sample data loaded");
        import
    }

    /// Wipes both keys and reseeds after confirmation. Returns whether it ran.
    pub fn clear_all(&mut self, confirmer: &dyn Confirmer) -> Result<bool> {
        if !confirmer.confirm(
            "Clear all data?",
            "This removes every expense and resets categories to the defaults.",
        )? {
            return Ok(false);
        }
        self.persistence.remove(CATEGORIES_KEY);
        self.persistence.remove(EXPENSES_KEY);
        let (categories, expenses) = load_lists(&self.persistence);
        self.state.categories = categories;
        self.state.expenses = expenses;
        self.save_expenses();
        self.state.editing = None;
        self.state.last_chart = None;
        self.state.category_query = None;
        self.state.page = Page::Usage;
        tracing::info!("all data cleared");
        Ok(true)
    }

    /// Writes the report into `dir` and returns the artifact path.
    pub fn export_report(&self, dir: &Path) -> Result<PathBuf> {
        let document = ReportDocument::build(&self.state, self.clock.now(), &self.currency);
        let exporter = ReportExporter::new(SvgRasterizer::default());
        Ok(exporter.export(&document, dir)?)
    }

    fn save_categories(&self) {
        self.persistence.save(CATEGORIES_KEY, &self.state.categories);
    }

    fn save_expenses(&self) {
        self.persistence.save(EXPENSES_KEY, &self.state.expenses);
    }
}

fn load_lists(persistence: &Persistence) -> (Vec<Category>, Vec<Expense>) {
    let mut categories: Vec<Category> = persistence.load(CATEGORIES_KEY, default_categories());
    if categories.is_empty() {
        tracing::warn!("stored category list is empty; reseeding defaults");
        categories = default_categories();
        persistence.save(CATEGORIES_KEY, &categories);
    }
    let expenses = persistence.load(EXPENSES_KEY, Vec::new());
    (categories, expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn app_with(store: Arc<MemoryStore>) -> BudgetApp {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        BudgetApp::open(
            Persistence::new(Box::new(store)),
            Box::new(FixedClock::at_noon(today)),
        )
    }

    fn form(category: &str, amount: &str) -> ExpenseForm {
        ExpenseForm {
            date: "2024-06-15".into(),
            category: category.into(),
            notes: String::new(),
            amount: amount.into(),
        }
    }

    #[test]
    fn empty_category_list_is_reseeded() {
        let store = Arc::new(MemoryStore::new());
        store.set(CATEGORIES_KEY, "[]").unwrap();
        let app = app_with(Arc::clone(&store));
        assert_eq!(app.state().categories.len(), 6);
        assert!(store.raw(CATEGORIES_KEY).unwrap().contains("Food"));
    }

    #[test]
    fn every_mutation_is_persisted() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with(Arc::clone(&store));
        app.submit_expense(&form("Gym", "20")).unwrap();
        assert!(store.raw(EXPENSES_KEY).unwrap().contains("Gym"));
        assert!(store.raw(CATEGORIES_KEY).unwrap().contains("Gym"));

        let id = app.state().expenses[0].id;
        app.delete_expense(id, &AutoConfirm).unwrap();
        assert_eq!(store.raw(EXPENSES_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn declined_confirmation_changes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with(Arc::clone(&store));
        app.submit_expense(&form("Food", "5")).unwrap();
        let id = app.state().expenses[0].id;
        assert!(app.delete_expense(id, &Decline).unwrap().is_none());
        assert!(!app.clear_all(&Decline).unwrap());
        let food = app.state().categories[0].id;
        assert!(app.delete_category(food, &Decline).unwrap().is_none());
        assert_eq!(app.state().expenses.len(), 1);
        assert_eq!(app.state().categories.len(), 6);
    }

    #[test]
    fn dashboard_render_caches_the_chart() {
        let mut app = app_with(Arc::new(MemoryStore::new()));
        app.navigate(Page::Dashboard);
        assert!(app.state().last_chart.is_none());

        app.submit_expense(&form("Food", "10")).unwrap();
        app.toggle_chart();
        app.render();
        let chart = app.state().last_chart.as_ref().expect("cached chart");
        assert_eq!(chart.kind, ChartKind::Bar);
    }

    #[test]
    fn cached_chart_follows_the_data() {
        let mut app = app_with(Arc::new(MemoryStore::new()));
        app.submit_expense(&form("Food", "10")).unwrap();
        app.navigate(Page::Dashboard);
        assert!(chart_text(&app).contains("Food"));

        app.submit_expense(&form("Transport", "30")).unwrap();
        assert!(chart_text(&app).contains("Transport"));

        app.navigate(Page::Entry);
        assert!(app.state().last_chart.is_none());
    }

    fn chart_text(app: &BudgetApp) -> String {
        app.state()
            .last_chart
            .as_ref()
            .map(|chart| chart.to_svg_string())
            .unwrap_or_default()
    }

    #[test]
    fn clear_all_reseeds_and_returns_home() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with(Arc::clone(&store));
        app.create_category("Pets", None).unwrap();
        app.submit_expense(&form("Pets", "10")).unwrap();
        app.navigate(Page::Dashboard);
        assert!(app.clear_all(&AutoConfirm).unwrap());
        assert_eq!(app.state().categories.len(), 6);
        assert!(app.state().expenses.is_empty());
        assert!(app.state().last_chart.is_none());
        assert_eq!(app.state().page, Page::Usage);
        assert_eq!(store.raw(EXPENSES_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn last_category_cannot_be_deleted() {
        let mut app = app_with(Arc::new(MemoryStore::new()));
        while app.state().categories.len() > 1 {
            let id = app.state().categories[0].id;
            app.delete_category(id, &AutoConfirm).unwrap();
        }
        let last = app.state().categories[0].id;
        let err = app.delete_category(last, &AutoConfirm).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn search_sets_and_clears_the_filter() {
        let mut app = app_with(Arc::new(MemoryStore::new()));
        assert_eq!(app.search_categories("food").len(), 1);
        assert_eq!(app.state().category_query.as_deref(), Some("food"));
        assert_eq!(app.search_categories("  ").len(), 6);
        assert!(app.state().category_query.is_none());
    }
}
