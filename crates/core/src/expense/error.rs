//! Expense validation errors.

use thiserror::Error;

use crate::amount::AmountError;

/// Errors raised by expense validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseError {
    /// Expense amount cannot be stored as given.
    #[error("Invalid expense amount: {0}")]
    Amount(#[from] AmountError),

    /// Description is longer than the stored column allows.
    #[error("Description must be at most {max} characters")]
    DescriptionTooLong {
        /// Maximum length.
        max: usize,
    },
}
