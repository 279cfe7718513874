use crate::chart::ChartKind;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::period::Period;
use crate::core::state::Page;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "dashboard",
        "Show totals by category with a chart",
        "dashboard [period <7|month|year|all>] [chart <pie|bar|toggle>]",
        cmd_dashboard,
    )]
}

fn cmd_dashboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    for pair in args.chunks(2) {
        match pair {
            [option, value] => apply_option(context, option, value)?,
            [option] => {
                return Err(CommandError::InvalidArguments(format!(
                    "`{}` needs a value",
                    option
                )))
            }
            _ => {}
        }
    }
    io::print_info(context.app.navigate(Page::Dashboard));
    Ok(())
}

fn apply_option(context: &mut ShellContext, option: &str, value: &str) -> CommandResult {
    match option.to_lowercase().as_str() {
        "period" => {
            let period: Period = value.parse()?;
            context.app.set_period(period);
        }
        "chart" => {
            if value.eq_ignore_ascii_case("toggle") {
                context.app.toggle_chart();
            } else {
                let kind: ChartKind = value.parse()?;
                context.app.set_chart_kind(kind);
            }
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown dashboard option `{}` (use period or chart)",
                other
            )))
        }
    }
    Ok(())
}
