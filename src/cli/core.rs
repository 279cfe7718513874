//! Core CLI loop, dispatch, and shell context helpers.

use std::io;

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use uuid::Uuid;

use crate::config::ConfigManager;
use crate::core::model::resolve_ref;
use crate::core::services::FileSampleSource;
use crate::core::time::SystemClock;
use crate::core::{AutoConfirm, BudgetApp, Confirmer};
use crate::errors::BudgetError;
pub use crate::errors::CliError;
use crate::storage::{JsonFileStore, Persistence};

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
pub use crate::cli::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_config_manager(mode, config_manager)
    }

    /// Builds a shell whose data lives under the manager's base directory.
    pub fn with_config_manager(mode: CliMode, config_manager: ConfigManager) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        let store = JsonFileStore::new(config_manager.store_dir()).map_err(BudgetError::from)?;
        let sample = FileSampleSource::new(config_manager.sample_path(&config));
        let app = BudgetApp::open(Persistence::new(Box::new(store)), Box::new(SystemClock))
            .with_config(&config)
            .with_sample_source(Box::new(sample))
            .with_data_dir(config_manager.base_dir());

        Ok(ShellContext {
            mode,
            registry,
            app,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        format!("budgetwise[{}]> ", self.app.state().page)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(BudgetError::Validation(message)) => {
                self.print_error(&message);
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }

    /// Re-renders the active page after a change.
    pub(crate) fn show_page(&mut self) {
        let rendered = self.app.render();
        cli_io::print_info(rendered);
    }

    /// Resolves a list position (newest first) or id prefix to an expense.
    pub(crate) fn expense_ref(&self, reference: &str) -> Result<Uuid, CommandError> {
        let state = self.app.state();
        resolve_ref(&state.expenses_newest_first(), reference).ok_or_else(|| {
            CommandError::InvalidArguments(format!("no expense matches `{}`", reference))
        })
    }

    /// Resolves a list position or id prefix to a category.
    pub(crate) fn category_ref(&self, reference: &str) -> Result<Uuid, CommandError> {
        let state = self.app.state();
        resolve_ref(&state.category_refs(), reference).ok_or_else(|| {
            CommandError::InvalidArguments(format!("no category matches `{}`", reference))
        })
    }
}

/// Confirmation source for destructive commands. Script mode accepts.
/// Borrows only the theme so handlers can mutate `app` alongside it.
pub(crate) fn confirmer(mode: CliMode, theme: &ColorfulTheme) -> Box<dyn Confirmer + '_> {
    match mode {
        CliMode::Script => Box::new(AutoConfirm),
        CliMode::Interactive => Box::new(cli_io::PromptConfirmer { theme }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    config_manager: ConfigManager,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_config_manager(CliMode::Script, config_manager)?;
    for line in lines {
        match crate::cli::shell::execute_line(&mut app, line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(app)
}
