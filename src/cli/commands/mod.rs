pub mod category;
pub mod dashboard;
pub mod data;
pub mod expense;
pub mod page;
pub mod report;
pub mod system;

use crate::cli::registry::CommandRegistry;

/// Registers every shell command, in the order `help` lists them.
pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        system::definitions(),
        page::definitions(),
        expense::definitions(),
        category::definitions(),
        dashboard::definitions(),
        report::definitions(),
        data::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}

/// Joins trailing arguments back into one free-text value.
pub(crate) fn rest(args: &[&str]) -> String {
    args.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_keeps_listing_order() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "help", "exit", "quit", "page", "expense", "category", "dashboard", "report",
                "data"
            ]
        );
    }
}
