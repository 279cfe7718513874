//! Line-oriented front end: the rustyline prompt for people and a stdin
//! reader for scripts. Both feed [`execute_line`].

use std::io::{self, BufRead};
use std::path::PathBuf;

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::chart::ChartKind;
use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output::info as output_info;
use crate::core::period::Period;
use crate::core::state::Page;

/// Set to read commands from stdin instead of an interactive prompt.
pub const SCRIPT_ENV: &str = "BUDGETWISE_CLI_SCRIPT";

const HISTORY_FILE: &str = "history.txt";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, "shell starting");

    let result = match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    };
    tracing::debug!(status = %context.status(), "shell finished");
    result
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let history = context.config_manager.base_dir().join(HISTORY_FILE);
    let mut editor = Editor::<BudgetCompleter, DefaultHistory>::new()?;
    editor.set_helper(Some(BudgetCompleter::new(context)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    if editor.load_history(&history).is_err() {
        tracing::debug!(path = %history.display(), "no shell history yet");
    }

    context.show_page();

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();
                let control = execute_line(context, line);
                // Category names feed completion of `expense add`.
                if let Some(helper) = editor.helper_mut() {
                    helper.categories = category_names(context);
                }
                match control {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => return Err(err.into()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    save_history(&mut editor, history);
    Ok(())
}

fn save_history(editor: &mut Editor<BudgetCompleter, DefaultHistory>, path: PathBuf) {
    if let Err(err) = editor.save_history(&path) {
        tracing::warn!(path = %path.display(), %err, "could not save shell history");
    }
}

/// Reads one command per stdin line. Blank lines and `#` comments are skipped.
fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match execute_line(context, line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(())
}

/// Tokenizes `line` shell-style and dispatches it.
///
/// Command failures are reported here so a bad line never ends a session;
/// only exit requests and reporting failures reach the caller.
pub(crate) fn execute_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&format!("Could not read `{}`: {}", line, err));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.to_string());

    match context.dispatch(&raw.to_lowercase(), raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        Ok(LoopControl::Continue) => Ok(LoopControl::Continue),
        Err(err) => {
            tracing::debug!(command = %raw, %err, "command failed");
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

fn category_names(context: &ShellContext) -> Vec<String> {
    context
        .app
        .state()
        .categories
        .iter()
        .map(|category| category.name.clone())
        .collect()
}

/// Tab completion for command names and the words each command takes.
struct BudgetCompleter {
    commands: Vec<String>,
    categories: Vec<String>,
}

impl BudgetCompleter {
    fn new(context: &ShellContext) -> Self {
        let mut commands: Vec<String> = context
            .command_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        commands.sort();
        Self {
            commands,
            categories: category_names(context),
        }
    }

    /// Words that may follow `typed`, the complete words already on the line.
    fn choices(&self, typed: &[&str]) -> Vec<String> {
        let lowered: Vec<String> = typed.iter().map(|word| word.to_lowercase()).collect();
        let words: Vec<&str> = lowered.iter().map(String::as_str).collect();
        match words.as_slice() {
            [] | ["help"] => self.commands.clone(),
            ["page"] => Page::ALL.iter().map(|page| page.as_str().to_string()).collect(),
            ["expense"] => owned(&["add", "edit", "cancel", "delete", "list", "suggest"]),
            ["expense", "add", _date] => self.categories.clone(),
            ["expense", "suggest"] => self.categories.clone(),
            ["category"] => owned(&["add", "edit", "delete", "list"]),
            ["data"] => owned(&["sample", "clear"]),
            ["dashboard", ..] if words.len() % 2 == 1 => owned(&["period", "chart"]),
            ["dashboard", .., "period"] => {
                Period::ALL.iter().map(|period| period.as_str().to_string()).collect()
            }
            ["dashboard", .., "chart"] => {
                let mut kinds: Vec<String> =
                    [ChartKind::Pie, ChartKind::Bar].iter().map(ToString::to_string).collect();
                kinds.push("toggle".to_string());
                kinds
            }
            _ => Vec::new(),
        }
    }

    /// Start offset of the word under the cursor and the choices matching it.
    fn complete_prefix(&self, prefix: &str) -> (usize, Vec<String>) {
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let typed: Vec<&str> = prefix[..start].split_whitespace().collect();
        let needle = prefix[start..].to_lowercase();
        let matches = self
            .choices(&typed)
            .into_iter()
            .filter(|choice| choice.to_lowercase().starts_with(&needle))
            .collect();
        (start, matches)
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

impl Completer for BudgetCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.complete_prefix(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, pairs))
    }
}

// rustyline's `Helper` bound; the default methods are enough.
impl Hinter for BudgetCompleter {
    type Hint = String;
}
impl Highlighter for BudgetCompleter {}
impl Validator for BudgetCompleter {}
impl Helper for BudgetCompleter {}
