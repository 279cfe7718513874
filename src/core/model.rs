//! Lookup and totals over the in-memory lists.

use uuid::Uuid;

use crate::domain::{Category, Expense, Identifiable};

/// Exact, case-sensitive lookup of a category by name.
pub fn resolve_category<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|category| category.name == name)
}

/// Exact lookup falling back to the last category, the catch-all bucket
/// used when painting badges for orphaned names.
pub fn resolve_category_or_fallback<'a>(
    categories: &'a [Category],
    name: &str,
) -> Option<&'a Category> {
    resolve_category(categories, name).or_else(|| categories.last())
}

/// Case-insensitive lookup used to decide whether a name needs a new category.
pub fn find_category_ci<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    let needle = name.trim().to_lowercase();
    categories
        .iter()
        .find(|category| category.name.trim().to_lowercase() == needle)
}

/// Sum of amounts; non-finite amounts count as zero.
pub fn compute_total<'a, I>(list: I) -> f64
where
    I: IntoIterator<Item = &'a Expense>,
{
    list.into_iter().map(Expense::counted_amount).sum()
}

/// Resolves a shell reference: a 1-based position in `items`, or an id prefix.
///
/// Prefixes must be at least four hex digits and match exactly one item.
pub fn resolve_ref<T: Identifiable>(items: &[&T], reference: &str) -> Option<Uuid> {
    let reference = reference.trim();
    if let Ok(position) = reference.parse::<usize>() {
        if position >= 1 && position <= items.len() {
            return Some(items[position - 1].id());
        }
    }
    let needle = reference.to_ascii_lowercase().replace('-', "");
    if needle.len() < 4 || !needle.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let mut matches = items
        .iter()
        .map(|item| item.id())
        .filter(|id| id.simple().to_string().starts_with(&needle));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Some(id),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_categories;
    use chrono::NaiveDate;

    fn expense(amount: f64) -> Expense {
        Expense::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "Food", "", amount)
    }

    #[test]
    fn compute_total_is_linear() {
        let a = vec![expense(10.0), expense(2.5)];
        let b = vec![expense(7.25), expense(f64::NAN)];
        let joined: Vec<_> = a.iter().chain(b.iter()).cloned().collect();
        assert_eq!(compute_total(&joined), compute_total(&a) + compute_total(&b));
        assert_eq!(compute_total(&joined), 19.75);
    }

    #[test]
    fn resolve_is_exact_and_fallback_is_explicit() {
        let categories = default_categories();
        assert!(resolve_category(&categories, "food").is_none());
        assert_eq!(resolve_category(&categories, "Food").unwrap().name, "Food");
        assert_eq!(
            resolve_category_or_fallback(&categories, "Rent").unwrap().name,
            "Other"
        );
        assert!(resolve_category_or_fallback(&[], "Rent").is_none());
    }

    #[test]
    fn case_insensitive_lookup_ignores_padding() {
        let categories = default_categories();
        assert_eq!(find_category_ci(&categories, " bills ").unwrap().name, "Bills");
        assert!(find_category_ci(&categories, "Rent").is_none());
    }

    #[test]
    fn references_accept_positions_and_prefixes() {
        let categories = default_categories();
        let refs: Vec<&Category> = categories.iter().collect();
        assert_eq!(resolve_ref(&refs, "2"), Some(categories[1].id));
        assert_eq!(resolve_ref(&refs, &categories[3].short_id()), Some(categories[3].id));
        assert_eq!(resolve_ref(&refs, "0"), None);
        assert_eq!(resolve_ref(&refs, "99"), None);
        assert_eq!(resolve_ref(&refs, "zz"), None);
    }
}
