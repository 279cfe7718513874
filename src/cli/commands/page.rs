use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::state::Page;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "page",
        "Switch to a page and show it",
        "page <usage|entry|dashboard|categories|about>",
        cmd_page,
    )]
}

fn cmd_page(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        // No argument re-renders the current page.
        context.show_page();
        return Ok(());
    };
    let page: Page = name.parse()?;
    let rendered = context.app.navigate(page);
    io::print_info(rendered);
    Ok(())
}
