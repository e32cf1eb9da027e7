//! Budget status evaluation and budget-vs-actual comparison.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::BudgetError;
pub use service::BudgetService;
pub use types::{
    ALERT_THRESHOLD, AlertLevel, Budget, BudgetKey, BudgetStatus, BudgetVsActual, INFO_THRESHOLD,
    NewBudget, OVERALL_LABEL, SpendingStatus, WARNING_THRESHOLD,
};
