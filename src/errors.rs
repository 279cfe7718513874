use std::result::Result as StdResult;

use thiserror::Error;

use crate::report::ExportError;

/// Unified error type for the domain, storage, and export layers.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("{0}")]
    Validation(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type Result<T> = StdResult<T, BudgetError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl BudgetError {
    pub fn validation(message: impl Into<String>) -> Self {
        BudgetError::Validation(message.into())
    }

    /// True for failures caused by user input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(self, BudgetError::Validation(_))
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<crate::storage::StorageError> for BudgetError {
    fn from(err: crate::storage::StorageError) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}
