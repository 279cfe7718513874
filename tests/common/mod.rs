#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use budgetwise::{
    core::{services::FileSampleSource, time::FixedClock, BudgetApp},
    storage::{JsonFileStore, Persistence},
    utils::paths,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique data directory for one test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Opens the app over the JSON store under `base`, frozen at noon on `today`.
/// The sample feed is read from `base` too.
pub fn open_app(base: &Path, today: NaiveDate) -> BudgetApp {
    let store = JsonFileStore::new(paths::store_dir_in(base)).expect("create json store");
    BudgetApp::open(
        Persistence::new(Box::new(store)),
        Box::new(FixedClock::at_noon(today)),
    )
    .with_sample_source(Box::new(FileSampleSource::new(paths::sample_file_in(base))))
    .with_data_dir(base)
}
