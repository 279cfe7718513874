use crate::cli::core::{confirmer, CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::state::Page;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "category",
        "Manage the category list",
        "category <add <name> [#RRGGBB]|edit <ref> <name> [#RRGGBB]|delete <ref>|list [query]>",
        cmd_category,
    )]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: category <add|edit|delete|list>".into(),
        ));
    }

    match args[0].to_lowercase().as_str() {
        "add" => handle_add(context, &args[1..]),
        "edit" => handle_edit(context, &args[1..]),
        "delete" | "remove" => handle_delete(context, &args[1..]),
        "list" | "search" => handle_list(context, &args[1..]),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category subcommand `{}`",
            other
        ))),
    }
}

/// Splits `<name words...> [#color]`.
fn name_and_color<'a>(args: &[&'a str]) -> (String, Option<&'a str>) {
    match args.split_last() {
        Some((last, name)) if last.starts_with('#') && !name.is_empty() => {
            (name.join(" "), Some(*last))
        }
        _ => (args.join(" "), None),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, color) = if args.is_empty() && context.mode() == CliMode::Interactive {
        let name = io::prompt_text(&context.theme, "Category name", "", false)?;
        let color = io::prompt_text(&context.theme, "Color (#RRGGBB, blank for default)", "", true)?;
        (name, (!color.trim().is_empty()).then_some(color))
    } else {
        let (name, color) = name_and_color(args);
        (name, color.map(str::to_string))
    };
    if name.trim().is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: category add <name> [#RRGGBB]".into(),
        ));
    }

    context.app.create_category(&name, color.as_deref())?;
    io::print_success(format!("Category \"{}\" added.", name.trim()));
    io::print_info(context.app.navigate(Page::Categories));
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((reference, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: category edit <position|id> <name> [#RRGGBB]".into(),
        ));
    };
    let id = context.category_ref(reference)?;
    let current = context
        .app
        .state()
        .category(id)
        .map(|category| (category.name.clone(), category.color.clone()))
        .unwrap_or_default();

    let (name, color) = match rest {
        [] if context.mode() == CliMode::Interactive => {
            let name = io::prompt_text(&context.theme, "Category name", &current.0, false)?;
            let color = io::prompt_text(&context.theme, "Color (#RRGGBB)", &current.1, false)?;
            (name, Some(color))
        }
        [] => {
            return Err(CommandError::InvalidArguments(
                "usage: category edit <position|id> <name> [#RRGGBB]".into(),
            ))
        }
        [color] if color.starts_with('#') => (current.0, Some(color.to_string())),
        _ => {
            let (name, color) = name_and_color(rest);
            (name, color.map(str::to_string))
        }
    };

    context.app.update_category(id, &name, color.as_deref())?;
    io::print_success(format!("Category \"{}\" updated.", name.trim()));
    io::print_info(context.app.navigate(Page::Categories));
    Ok(())
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [reference] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: category delete <position|id>".into(),
        ));
    };
    let id = context.category_ref(reference)?;
    let confirm = confirmer(context.mode, &context.theme);
    match context.app.delete_category(id, confirm.as_ref())? {
        Some(removed) => {
            io::print_success(format!("Category \"{}\" deleted.", removed.name));
            io::print_info(context.app.navigate(Page::Categories));
        }
        None => io::print_info("Delete cancelled."),
    }
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    let matches = context.app.search_categories(&query).len();
    if matches == 0 {
        io::print_warning(format!("No categories match \"{}\".", query.trim()));
    }
    io::print_info(context.app.navigate(Page::Categories));
    Ok(())
}
