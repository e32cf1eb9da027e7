//! Budget status evaluation.

use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{
    ALERT_THRESHOLD, AlertLevel, Budget, BudgetStatus, BudgetVsActual, INFO_THRESHOLD,
    SpendingStatus, WARNING_THRESHOLD,
};
use crate::alert::status_line;
use crate::amount;
use crate::expense::SpendingSummary;

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Evaluate a budget against the spending counted for its key.
    ///
    /// Pure: the same budget and spending always give the same status.
    #[must_use]
    pub fn evaluate(budget: &Budget, current_spending: Decimal) -> BudgetStatus {
        let percentage_used = Self::percentage_used(budget.amount, current_spending);
        let alert_level = Self::alert_level(percentage_used);
        let should_alert = percentage_used >= INFO_THRESHOLD;

        let alert_message = should_alert
            .then(|| status_line(alert_level, current_spending, budget.amount, percentage_used))
            .flatten();

        BudgetStatus {
            budget_id: budget.id,
            user_id: budget.user_id,
            category_id: budget.category_id,
            category_name: budget.category_label().to_string(),
            month_year: budget.month_year,
            budget_amount: budget.amount,
            current_spending,
            remaining_budget: budget.amount - current_spending,
            percentage_used,
            status: Self::classify(budget.amount, current_spending, percentage_used),
            alert_level,
            should_alert,
            alert_message,
        }
    }

    /// Compare a budget with the month's actual spending.
    #[must_use]
    pub fn compare_with_actual(budget: &Budget, actual: &SpendingSummary) -> BudgetVsActual {
        let percentage_used = Self::percentage_used(budget.amount, actual.total);

        BudgetVsActual {
            budget_id: budget.id,
            category_id: budget.category_id,
            category_name: budget.category_label().to_string(),
            month_year: budget.month_year,
            budget_amount: budget.amount,
            actual_spending: actual.total,
            expense_count: actual.expense_count,
            difference: budget.amount - actual.total,
            percentage_used: percentage_used.round_dp(2),
            is_over_budget: actual.total > budget.amount,
            status: Self::classify(budget.amount, actual.total, percentage_used),
        }
    }

    /// Share of the budget used, in percent. Zero when the budget is not positive.
    #[must_use]
    pub fn percentage_used(amount: Decimal, spending: Decimal) -> Decimal {
        if amount > Decimal::ZERO {
            spending / amount * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }

    /// Health label.
    ///
    /// `Exceeded` compares the raw amounts, so spending exactly equal to the
    /// budget falls through to the percentage branches.
    #[must_use]
    pub fn classify(amount: Decimal, spending: Decimal, percentage_used: Decimal) -> SpendingStatus {
        if spending > amount {
            SpendingStatus::Exceeded
        } else if percentage_used >= WARNING_THRESHOLD {
            SpendingStatus::Critical
        } else if percentage_used >= INFO_THRESHOLD {
            SpendingStatus::Warning
        } else {
            SpendingStatus::OnTrack
        }
    }

    /// Alert severity for a percentage. Lower bounds are inclusive.
    #[must_use]
    pub fn alert_level(percentage_used: Decimal) -> AlertLevel {
        if percentage_used >= ALERT_THRESHOLD {
            AlertLevel::Alert
        } else if percentage_used >= WARNING_THRESHOLD {
            AlertLevel::Warning
        } else if percentage_used >= INFO_THRESHOLD {
            AlertLevel::Info
        } else {
            AlertLevel::None
        }
    }

    /// Validate a budget amount before it is stored.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Amount` if the amount is not positive or would be
    /// rounded or overflow in storage.
    pub fn validate_amount(amount: Decimal) -> Result<(), BudgetError> {
        amount::check(amount)?;
        Ok(())
    }
}
