//! Common types used across the application.

pub mod id;
pub mod month_year;

pub use id::*;
pub use month_year::{MonthYear, MonthYearError};
