use uuid::Uuid;

use crate::core::model::find_category_ci;
use crate::core::services::{ServiceError, ServiceResult};
use crate::core::state::AppState;
use crate::domain::{parse_hex_color, Category, DEFAULT_COLOR};

pub struct CategoryService;

impl CategoryService {
    pub fn create(state: &mut AppState, name: &str, color: Option<&str>) -> ServiceResult<Uuid> {
        let name = Self::validate_name(state, None, name)?;
        let color = Self::validate_color(color)?;
        let category = Category::new(name, color);
        let id = category.id;
        state.categories.push(category);
        Ok(id)
    }

    /// Renames and recolors in place. Expenses keep whatever name they stored.
    pub fn update(
        state: &mut AppState,
        id: Uuid,
        name: &str,
        color: Option<&str>,
    ) -> ServiceResult<()> {
        let name = Self::validate_name(state, Some(id), name)?;
        let color = match color {
            Some(_) => Some(Self::validate_color(color)?),
            None => None,
        };
        let category = state
            .category_mut(id)
            .ok_or_else(|| ServiceError::CategoryNotFound(id.to_string()))?;
        category.rename(name);
        if let Some(color) = color {
            category.color = color;
        }
        Ok(())
    }

    /// Removes a category unless it is the last one. Does not touch expenses.
    pub fn delete(state: &mut AppState, id: Uuid) -> ServiceResult<Category> {
        let index = state
            .categories
            .iter()
            .position(|category| category.id == id)
            .ok_or_else(|| ServiceError::CategoryNotFound(id.to_string()))?;
        if state.categories.len() <= 1 {
            return Err(ServiceError::Invalid("Cannot delete last category.".into()));
        }
        Ok(state.categories.remove(index))
    }

    /// Case-insensitive substring filter; a blank query returns everything.
    pub fn search<'a>(categories: &'a [Category], query: &str) -> Vec<&'a Category> {
        let needle = query.trim().to_lowercase();
        categories
            .iter()
            .filter(|category| needle.is_empty() || category.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Creates `name` with the default color unless a category already
    /// matches it case-insensitively. Returns the created category.
    pub fn ensure(state: &mut AppState, name: &str) -> Option<Category> {
        let name = name.trim();
        if name.is_empty() || find_category_ci(&state.categories, name).is_some() {
            return None;
        }
        let category = Category::with_default_color(name);
        tracing::info!(name = %category.name, "auto-created category");
        state.categories.push(category.clone());
        Some(category)
    }

    fn validate_name(state: &AppState, exclude: Option<Uuid>, candidate: &str) -> ServiceResult<String> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::Invalid("Name is required".into()));
        }
        let normalized = trimmed.to_lowercase();
        let duplicate = state.categories.iter().any(|category| {
            category.name.trim().to_lowercase() == normalized
                && exclude.map_or(true, |id| category.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Category `{}` already exists",
                trimmed
            )))
        } else {
            Ok(trimmed.to_string())
        }
    }

    fn validate_color(color: Option<&str>) -> ServiceResult<String> {
        match color.map(str::trim) {
            None | Some("") => Ok(DEFAULT_COLOR.to_string()),
            Some(value) if parse_hex_color(value).is_some() => Ok(value.to_uppercase()),
            Some(value) => Err(ServiceError::Invalid(format!(
                "invalid color `{}` (use #RRGGBB)",
                value
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Expense;
    use chrono::NaiveDate;

    #[test]
    fn create_derives_key_and_validates() {
        let mut state = AppState::default();
        let id = CategoryService::create(&mut state, "  Eating Out ", Some("#12ab34")).unwrap();
        let created = state.category(id).unwrap();
        assert_eq!(created.name, "Eating Out");
        assert_eq!(created.key, "eating-out");
        assert_eq!(created.color, "#12AB34");

        assert!(CategoryService::create(&mut state, "   ", None).is_err());
        assert!(CategoryService::create(&mut state, "eating out", None).is_err());
        assert!(CategoryService::create(&mut state, "Pets", Some("blue")).is_err());
        assert_eq!(state.categories.len(), 7);
    }

    #[test]
    fn update_renames_and_recolors_in_place() {
        let mut state = AppState::default();
        let id = state.categories[0].id;
        CategoryService::update(&mut state, id, "Groceries", Some("#000000")).unwrap();
        assert_eq!(state.categories[0].name, "Groceries");
        assert_eq!(state.categories[0].key, "groceries");
        assert_eq!(state.categories[0].color, "#000000");

        // Keeping its own name is not a duplicate.
        CategoryService::update(&mut state, id, "groceries", None).unwrap();
        assert_eq!(state.categories[0].color, "#000000");
        assert!(CategoryService::update(&mut state, id, "Bills", None).is_err());
    }

    #[test]
    fn delete_keeps_expense_labels_and_guards_last() {
        let mut state = AppState::default();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        state.expenses.push(Expense::new(date, "Food", "", 4.0));

        let food = state.categories[0].id;
        CategoryService::delete(&mut state, food).unwrap();
        assert_eq!(state.expenses[0].category, "Food");

        while state.categories.len() > 1 {
            let id = state.categories[0].id;
            CategoryService::delete(&mut state, id).unwrap();
        }
        let last = state.categories[0].id;
        let err = CategoryService::delete(&mut state, last).unwrap_err();
        assert!(err.to_string().contains("last category"));
        assert_eq!(state.categories.len(), 1);
    }

    #[test]
    fn search_is_case_insensitive() {
        let state = AppState::default();
        let hits: Vec<_> = CategoryService::search(&state.categories, "OP")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(hits, vec!["Shopping"]);
        assert_eq!(CategoryService::search(&state.categories, "").len(), 6);
    }
}
