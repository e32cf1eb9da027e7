//! Expenses and the queries that total them.

pub mod error;
pub mod types;

pub use error::ExpenseError;
pub use types::{
    CategorySpending, Expense, ExpenseInput, ExpenseStatus, PaymentMethod, SpendingQuery,
    SpendingSummary,
};

use crate::amount;

/// Longest accepted description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

impl ExpenseInput {
    /// Check the input before it is written.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::Amount` for amounts that are not positive or do
    /// not fit the amount column, and `ExpenseError::DescriptionTooLong` for
    /// oversized descriptions.
    pub fn validate(&self) -> Result<(), ExpenseError> {
        amount::check(self.amount)?;
        if self
            .description
            .as_ref()
            .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN)
        {
            return Err(ExpenseError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LEN,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use spendwatch_shared::types::{CategoryId, MonthYear, UserId};

    use crate::amount::AmountError;
    use crate::budget::BudgetKey;

    fn input(amount: Decimal) -> ExpenseInput {
        ExpenseInput {
            category_id: CategoryId::new(1),
            amount,
            expense_date: NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date"),
            description: None,
            payment_method: PaymentMethod::Upi,
            status: ExpenseStatus::default(),
        }
    }

    #[test]
    fn test_validate_accepts_positive_amount() {
        assert!(input(dec!(0.01)).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_and_negative() {
        assert_eq!(
            input(dec!(0)).validate(),
            Err(ExpenseError::Amount(AmountError::NonPositive(dec!(0))))
        );
        assert!(input(dec!(-5)).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_sub_cent_amount() {
        assert_eq!(
            input(dec!(19.999)).validate(),
            Err(ExpenseError::Amount(AmountError::TooManyDecimals(dec!(19.999))))
        );
    }

    #[test]
    fn test_validate_rejects_long_description() {
        let mut long = input(dec!(10));
        long.description = Some("x".repeat(MAX_DESCRIPTION_LEN + 1));
        assert_eq!(
            long.validate(),
            Err(ExpenseError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LEN
            })
        );
    }

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::NetBanking).expect("serialize"),
            "\"Net Banking\""
        );
        let parsed: PaymentMethod = serde_json::from_str("\"UPI\"").expect("deserialize");
        assert_eq!(parsed, PaymentMethod::Upi);
        assert_eq!(PaymentMethod::Upi.as_str(), "UPI");
    }

    #[test]
    fn test_status_defaults_to_approved() {
        assert_eq!(ExpenseStatus::default(), ExpenseStatus::Approved);
    }

    #[test]
    fn test_spending_query_from_budget_key() {
        let month = MonthYear::parse("2024-02").expect("valid month");
        let key = BudgetKey::overall(UserId::new(4), month);
        let query = SpendingQuery::from(&key);
        assert_eq!(query, SpendingQuery::overall(UserId::new(4), month));
    }
}
