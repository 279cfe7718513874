use crate::cli::core::{confirmer, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::services::SampleOrigin;
use crate::core::state::Page;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "data",
        "Load sample data or clear everything",
        "data <sample|clear>",
        cmd_data,
    )]
}

fn cmd_data(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [action] if action.eq_ignore_ascii_case("sample") => load_sample(context),
        [action] if action.eq_ignore_ascii_case("clear") => clear(context),
        _ => Err(CommandError::InvalidArguments(
            "usage: data <sample|clear>".into(),
        )),
    }
}

fn load_sample(context: &mut ShellContext) -> CommandResult {
    let import = context.app.load_sample();
    match import.origin {
        SampleOrigin::Source => {
            io::print_success(format!("Loaded {} sample expenses.", import.count))
        }
        SampleOrigin::Synthetic => io::print_warning(format!(
            "Sample file unavailable; generated {} sample expenses instead.",
            import.count
        )),
    }
    for category in &import.created_categories {
        io::print_hint(format!("Added new category \"{}\".", category.name));
    }
    io::print_info(context.app.navigate(Page::Entry));
    Ok(())
}

fn clear(context: &mut ShellContext) -> CommandResult {
    let cleared = {
        let confirm = confirmer(context.mode, &context.theme);
        context.app.clear_all(confirm.as_ref())?
    };
    if cleared {
        io::print_success("All data cleared.");
        context.show_page();
    } else {
        io::print_info("Clear cancelled.");
    }
    Ok(())
}
