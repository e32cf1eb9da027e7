//! Budget validation errors.

use thiserror::Error;

use crate::amount::AmountError;

/// Errors raised by budget validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Budget amount cannot be stored as given.
    #[error("Invalid budget amount: {0}")]
    Amount(#[from] AmountError),
}
