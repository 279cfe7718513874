//! Sample data import with a synthetic fallback.

use std::{fs, path::PathBuf};

use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

use crate::core::services::CategoryService;
use crate::core::state::AppState;
use crate::domain::{default_category_names, Category, Expense};

const SYNTHETIC_COUNT: usize = 8;
const FALLBACK_CATEGORY: &str = "Other";

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("sample source unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
    #[error("sample payload is invalid: {0}")]
    Invalid(#[from] serde_json::Error),
    #[error("sample payload is empty")]
    Empty,
}

/// Expense-shaped record as found in a sample feed.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "crate::domain::expense::lenient_amount")]
    pub amount: f64,
}

/// Somewhere sample expenses can be fetched from.
pub trait SampleSource {
    fn fetch(&self) -> Result<Vec<SampleRecord>, SampleError>;
}

/// Reads a JSON array of sample records from disk.
#[derive(Debug, Clone)]
pub struct FileSampleSource {
    path: PathBuf,
}

impl FileSampleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SampleSource for FileSampleSource {
    fn fetch(&self) -> Result<Vec<SampleRecord>, SampleError> {
        let data = fs::read_to_string(&self.path)?;
        let records: Vec<SampleRecord> = serde_json::from_str(&data)?;
        if records.is_empty() {
            return Err(SampleError::Empty);
        }
        Ok(records)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOrigin {
    Source,
    Synthetic,
}

#[derive(Debug, Clone)]
pub struct SampleImport {
    pub origin: SampleOrigin,
    pub count: usize,
    pub created_categories: Vec<Category>,
}

pub struct SampleService;

impl SampleService {
    /// Replaces the expense list with sample data, creating any category
    /// the sample names. Falls back to generated data when the source fails.
    pub fn import(state: &mut AppState, source: &dyn SampleSource, today: NaiveDate) -> SampleImport {
        let (origin, expenses) = match source.fetch() {
            Ok(records) => (SampleOrigin::Source, Self::from_records(records)),
            Err(err) => {
                tracing::warn!(error = %err, "sample fetch failed; generating synthetic data");
                (
                    SampleOrigin::Synthetic,
                    Self::synthetic(today, &mut rand::thread_rng()),
                )
            }
        };

        let mut created_categories = Vec::new();
        for expense in &expenses {
            if let Some(category) = CategoryService::ensure(state, &expense.category) {
                created_categories.push(category);
            }
        }

        let count = expenses.len();
        state.expenses = expenses;
        state.editing = None;
        SampleImport {
            origin,
            count,
            created_categories,
        }
    }

    /// Eight expenses on consecutive days ending `today`, cycling through the
    /// default categories with amounts in `[5, 95)`.
    pub fn synthetic<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Vec<Expense> {
        let names: Vec<&str> = default_category_names().collect();
        (0..SYNTHETIC_COUNT)
            .map(|i| {
                let date = today - Duration::days(i as i64);
                let amount = (rng.gen_range(5.0..95.0_f64) * 100.0).round() / 100.0;
                Expense::new(date, names[i % names.len()], format!("Sample {}", i + 1), amount)
            })
            .collect()
    }

    fn from_records(records: Vec<SampleRecord>) -> Vec<Expense> {
        records
            .into_iter()
            .map(|record| {
                let category = record
                    .category
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());
                Expense::new(
                    record.date,
                    category,
                    record.notes.unwrap_or_default(),
                    record.amount,
                )
            })
            .collect()
    }
}
