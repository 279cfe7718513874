use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "report",
        "Export a printable report",
        "report [directory]",
        cmd_report,
    )]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let dir = match args {
        [] => context
            .config
            .export_dir
            .clone()
            .map(Ok)
            .unwrap_or_else(std::env::current_dir)?,
        [dir] => PathBuf::from(dir),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: report [directory]".into(),
            ))
        }
    };

    io::print_info("Preparing report...");
    let path = context.app.export_report(&dir)?;
    io::print_success(format!("Report saved to {}", path.display()));
    Ok(())
}
