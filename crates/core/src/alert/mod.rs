//! Alert decisions turned into user-facing text.

pub mod content;
pub mod format;

pub use content::{budget_alert, expense_added, monthly_summary, status_line};
pub use format::{CURRENCY_SYMBOL, format_amount, format_money, format_percent};
