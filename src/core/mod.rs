pub mod app;
pub mod model;
pub mod period;
pub mod services;
pub mod state;
pub mod time;

pub use app::{AutoConfirm, BudgetApp, Confirmer, Decline};
