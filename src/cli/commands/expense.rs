use crate::cli::commands::rest;
use crate::cli::core::{confirmer, CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::forms;
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::services::{ExpenseForm, SubmitOutcome};
use crate::core::state::Page;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "expense",
        "Record, edit, and delete expenses",
        "expense <add [date category amount [notes...]]|edit <ref>|cancel|delete <ref>|list|suggest <text>>",
        cmd_expense,
    )]
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: expense <add|edit|cancel|delete|list|suggest>".into(),
        ));
    };

    match action.to_lowercase().as_str() {
        "add" => handle_add(context, &args[1..]),
        "edit" => handle_edit(context, &args[1..]),
        "cancel" => handle_cancel(context),
        "delete" | "remove" => handle_delete(context, &args[1..]),
        "list" => {
            io::print_info(context.app.navigate(Page::Entry));
            Ok(())
        }
        "suggest" => handle_suggest(context, &args[1..]),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown expense subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let form = match args {
        [] if context.mode() == CliMode::Interactive => {
            let initial = context.app.current_form();
            forms::prompt_expense(&context.theme, &context.app, &initial)?
        }
        [date, category, amount, notes @ ..] => ExpenseForm {
            date: date.to_string(),
            category: category.to_string(),
            notes: rest(notes),
            amount: amount.to_string(),
        },
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: expense add <date> <category> <amount> [notes...]".into(),
            ))
        }
    };
    submit(context, &form)
}

fn submit(context: &mut ShellContext, form: &ExpenseForm) -> CommandResult {
    let report = context.app.submit_expense(form)?;
    if let Some(category) = &report.created_category {
        io::print_hint(format!("Added new category \"{}\".", category.name));
    }
    match report.outcome {
        SubmitOutcome::Added(_) => io::print_success("Expense added."),
        SubmitOutcome::Updated(_) => io::print_success("Expense updated."),
    }
    io::print_info(context.app.navigate(Page::Entry));
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [reference] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: expense edit <position|id>".into(),
        ));
    };
    let id = context.expense_ref(reference)?;
    let Some(form) = context.app.start_edit(id) else {
        return Err(CommandError::Message(format!("expense `{}` is gone", reference)));
    };

    if context.mode() == CliMode::Interactive {
        let edited = forms::prompt_expense(&context.theme, &context.app, &form)?;
        return submit(context, &edited);
    }

    io::print_info(context.app.render());
    io::print_hint("Run `expense add ...` to save changes or `expense cancel` to stop editing.");
    Ok(())
}

fn handle_cancel(context: &mut ShellContext) -> CommandResult {
    if context.app.state().editing.is_none() {
        io::print_info("Nothing is being edited.");
        return Ok(());
    }
    context.app.cancel_edit();
    io::print_info("Edit cancelled.");
    io::print_info(context.app.navigate(Page::Entry));
    Ok(())
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [reference] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: expense delete <position|id>".into(),
        ));
    };
    let id = context.expense_ref(reference)?;
    let confirm = confirmer(context.mode, &context.theme);
    match context.app.delete_expense(id, confirm.as_ref())? {
        Some(_) => {
            io::print_success("Expense deleted.");
            io::print_info(context.app.navigate(Page::Entry));
        }
        None => io::print_info("Delete cancelled."),
    }
    Ok(())
}

fn handle_suggest(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let input = rest(args);
    let names: Vec<&str> = context
        .app
        .suggest(&input)
        .into_iter()
        .map(|category| category.name.as_str())
        .collect();
    if names.is_empty() {
        io::print_info("No matching categories.");
    } else {
        io::print_info(names.join("\n"));
    }
    Ok(())
}
