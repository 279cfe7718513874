pub mod category_service;
pub mod expense_service;
pub mod sample_service;
pub mod summary_service;

pub use category_service::CategoryService;
pub use expense_service::{ExpenseForm, ExpenseService, SubmitOutcome, SubmitReport};
pub use sample_service::{FileSampleSource, SampleImport, SampleOrigin, SampleService, SampleSource};
pub use summary_service::{CategoryTotal, DashboardView, SummaryService, TopCategory};

use crate::errors::BudgetError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Invalid(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
}

impl From<ServiceError> for BudgetError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Invalid(message) => BudgetError::Validation(message),
            ServiceError::ExpenseNotFound(what) => BudgetError::ExpenseNotFound(what),
            ServiceError::CategoryNotFound(what) => BudgetError::CategoryNotFound(what),
        }
    }
}
