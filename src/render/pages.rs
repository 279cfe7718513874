use std::fmt::Write;

use crate::core::period::Period;
use crate::core::services::{CategoryService, SummaryService};
use crate::core::state::AppState;
use crate::currency::format_percent;
use crate::domain::Identifiable;
use crate::render::table::{Column, Table};
use crate::render::widgets::{badge, bar, muted, swatch};
use crate::render::RenderContext;

const CHART_BAR_WIDTH: usize = 32;

pub fn usage() -> String {
    let steps = [
        "Add expenses from the Expenses page (`page entry`, then `expense add`).",
        "Manage categories in Categories (`page categories`).",
        "View charts and summary in Dashboard and export a report (`report`).",
        "Your data is saved locally. Use `data clear` to reset.",
    ];
    let mut out = String::new();
    for (index, step) in steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, step);
    }
    out.push_str(&muted("Go to Expenses with `page entry`, or open `page dashboard`."));
    out
}

pub fn entry(state: &AppState, ctx: &RenderContext<'_>) -> String {
    let mut out = String::new();
    match state.editing_expense() {
        Some(expense) => {
            let _ = writeln!(
                out,
                "Editing {} ({} · {} · {}). Save with `expense add <date> <category> <amount> [notes]` or `expense cancel`.",
                expense.short_id(),
                expense.date.format("%Y-%m-%d"),
                expense.category,
                ctx.currency.format(expense.amount)
            );
        }
        None => {
            let _ = writeln!(
                out,
                "Add an expense: `expense add <date> <category> <amount> [notes]`"
            );
        }
    }
    out.push_str(&muted("Tip: `expense suggest <text>` lists matching categories."));
    out.push('\n');

    if state.expenses.is_empty() {
        out.push('\n');
        out.push_str("No expenses yet. Load sample data with `data sample`.");
        return out;
    }

    let mut table = Table::new(vec![
        Column::right("#"),
        Column::left("ID"),
        Column::left("Date"),
        Column::left("Category").max(24),
        Column::right("Amount"),
        Column::left("Notes").max(32),
    ]);
    for (position, expense) in state.expenses_newest_first().into_iter().enumerate() {
        let marker = if state.editing == Some(expense.id) { "*" } else { "" };
        table.push(vec![
            format!("{}{}", marker, position + 1),
            expense.short_id(),
            expense.date.format("%Y-%m-%d").to_string(),
            badge(&state.categories, &expense.category),
            ctx.currency.format(expense.amount),
            expense.notes.clone(),
        ]);
    }
    out.push('\n');
    out.push_str(&table.render());
    out
}

pub fn dashboard(state: &AppState, ctx: &RenderContext<'_>) -> String {
    let view = SummaryService::dashboard(&state.expenses, &state.categories, state.period, ctx.now);
    let mut out = String::new();
    let _ = writeln!(out, "Total: {}", ctx.currency.format(view.all_time_total));
    let periods: Vec<String> = Period::ALL
        .iter()
        .map(|period| {
            if *period == state.period {
                format!("[{}]", period.label())
            } else {
                period.label().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "Period: {}", periods.join("  "));
    let _ = writeln!(
        out,
        "Chart:  {} (toggle with `dashboard chart toggle`)",
        state.chart_kind
    );
    out.push('\n');

    if view.is_empty() {
        out.push_str("No data to show\n");
        out.push_str(&muted("Add some expenses to see analysis (`page entry`)."));
        out.push('\n');
        out.push_str("Insights: No expenses in this period.");
        return out;
    }

    let max = view
        .breakdown
        .iter()
        .map(|entry| entry.total)
        .fold(0.0_f64, f64::max);
    let mut table = Table::new(vec![
        Column::left(""),
        Column::left("Category").max(24),
        Column::right("Amount"),
        Column::right("Share"),
        Column::left(""),
    ]);
    for entry in &view.breakdown {
        table.push(vec![
            swatch(&entry.color),
            entry.name.clone(),
            ctx.currency.format(entry.total),
            format_percent(entry.total / view.period_total * 100.0),
            bar(entry.total, max, CHART_BAR_WIDTH, &entry.color),
        ]);
    }
    out.push_str(&table.render());
    out.push('\n');

    if let Some(top) = &view.top {
        let _ = write!(
            out,
            "\nInsights: {} is the top category ({} of period) at {}",
            top.name,
            format_percent(top.percent),
            ctx.currency.format(top.total)
        );
    }
    out
}

pub fn categories(state: &AppState) -> String {
    let query = state.category_query.as_deref().unwrap_or("");
    let matches = CategoryService::search(&state.categories, query);
    let mut out = String::new();
    if !query.trim().is_empty() {
        let _ = writeln!(out, "Filter: \"{}\" (`category list` to clear)", query.trim());
    }
    if matches.is_empty() {
        out.push_str("No categories match.");
        return out;
    }

    let mut table = Table::new(vec![
        Column::right("#"),
        Column::left(""),
        Column::left("Name").max(28),
        Column::left("Key"),
        Column::left("Color"),
    ]);
    for category in matches {
        let position = state
            .categories
            .iter()
            .position(|c| c.id == category.id)
            .map_or(0, |idx| idx + 1);
        table.push(vec![
            position.to_string(),
            swatch(&category.color),
            category.name.clone(),
            category.key.clone(),
            category.color.clone(),
        ]);
    }
    out.push_str(&table.render());
    out.push('\n');
    out.push_str(&muted(
        "New: `category add <name> [#RRGGBB]`  Edit: `category edit <#> <name> [#RRGGBB]`  Delete: `category delete <#>`",
    ));
    out
}

pub fn about(ctx: &RenderContext<'_>) -> String {
    let mut out = String::from(
        "Personal expense tracker. Add and edit categories, keep data locally, export a report.\n\n",
    );
    let commands = [
        ("report [dir]", "Export the printable report"),
        ("data sample", "Load sample data"),
        ("data clear", "Clear all local data"),
    ];
    for (command, description) in commands {
        let _ = writeln!(out, "  {:<14} {}", command, description);
    }
    if let Some(dir) = ctx.data_dir {
        let _ = write!(out, "\nData directory: {}", dir.display());
    }
    out
}
