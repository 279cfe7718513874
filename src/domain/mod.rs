//! Pure domain records (expenses and categories). No I/O, only data types.

pub mod category;
pub mod common;
pub mod expense;

pub use category::*;
pub use common::*;
pub use expense::*;
