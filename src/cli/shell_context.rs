use dialoguer::theme::ColorfulTheme;

use crate::config::{Config, ConfigManager};
use crate::core::BudgetApp;

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub app: BudgetApp,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, page: {}, config: {} }}",
            self.running,
            self.last_command,
            self.app.state().page,
            self.config_manager.path().display()
        )
    }
}
