mod common;

use std::path::Path;

use budgetwise::{
    domain::{default_categories, Category, Expense},
    storage::{JsonFileStore, Persistence, CATEGORIES_KEY, EXPENSES_KEY},
    utils::paths,
};
use common::{date, temp_base};

fn persistence(base: &Path) -> Persistence {
    let store = JsonFileStore::new(paths::store_dir_in(base)).expect("create json store");
    Persistence::new(Box::new(store))
}

#[test]
fn categories_survive_a_save_and_reload() {
    let base = temp_base();
    let mut categories = default_categories();
    let mut renamed = Category::new("Pets", "#00AA00");
    renamed.rename("Kids School Fees");
    categories.push(renamed);

    persistence(&base).save(CATEGORIES_KEY, &categories);
    let loaded: Vec<Category> = persistence(&base).load(CATEGORIES_KEY, Vec::new());

    assert_eq!(loaded, categories);
    assert_eq!(loaded.last().map(|c| c.key.as_str()), Some("kids-school-fees"));
}

#[test]
fn expenses_survive_a_save_and_reload() {
    let base = temp_base();
    let expenses = vec![
        Expense::new(date(2024, 5, 18), "Food", "", 12.5),
        Expense::new(date(2024, 2, 29), "Transport", "taxi \"late\" ride, 2am", 0.1),
        Expense::new(date(2023, 12, 31), "Bills", "électricité", 1234.56),
    ];

    persistence(&base).save(EXPENSES_KEY, &expenses);
    let loaded: Vec<Expense> = persistence(&base).load(EXPENSES_KEY, Vec::new());

    assert_eq!(loaded, expenses);
}

#[test]
fn missing_key_seeds_the_fallback() {
    let base = temp_base();
    let seeded: Vec<Category> = persistence(&base).load(CATEGORIES_KEY, default_categories());
    let names: Vec<&str> = seeded.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Food", "Transport", "Shopping", "Bills", "Entertainment", "Other"]);

    let reread: Vec<Category> = persistence(&base).load(CATEGORIES_KEY, Vec::new());
    assert_eq!(reread, seeded);
}
