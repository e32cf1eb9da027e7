//! Property-based tests for budget evaluation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::BudgetService;
use super::types::{AlertLevel, INFO_THRESHOLD, SpendingStatus};

fn budget_with_amount(amount: Decimal) -> super::types::Budget {
    unit_tests::test_budget(None, amount)
}

proptest! {
    /// remaining = budget - spending, for any inputs including overspend.
    #[test]
    fn test_remaining_is_budget_minus_spending(
        amount_cents in 1i64..100_000_000_000,
        spending_cents in 0i64..200_000_000_000,
    ) {
        let amount = Decimal::new(amount_cents, 2);
        let spending = Decimal::new(spending_cents, 2);

        let status = BudgetService::evaluate(&budget_with_amount(amount), spending);

        prop_assert_eq!(status.remaining_budget, amount - spending);
        prop_assert_eq!(status.budget_amount, amount);
        prop_assert_eq!(status.current_spending, spending);
    }

    /// If B > 0: percentage_used = (S / B) * 100, unrounded.
    #[test]
    fn test_percentage_positive_budget(
        amount_cents in 1i64..100_000_000_000,
        spending_cents in 0i64..200_000_000_000,
    ) {
        let amount = Decimal::new(amount_cents, 2);
        let spending = Decimal::new(spending_cents, 2);

        let status = BudgetService::evaluate(&budget_with_amount(amount), spending);

        prop_assert_eq!(status.percentage_used, spending / amount * Decimal::ONE_HUNDRED);
    }

    /// If B <= 0: percentage_used = 0 and nothing alerts.
    #[test]
    fn test_percentage_non_positive_budget(
        amount_cents in -1_000_000i64..=0,
        spending_cents in 0i64..1_000_000,
    ) {
        let amount = Decimal::new(amount_cents, 2);
        let spending = Decimal::new(spending_cents, 2);

        let status = BudgetService::evaluate(&budget_with_amount(amount), spending);

        prop_assert_eq!(status.percentage_used, Decimal::ZERO);
        prop_assert_eq!(status.alert_level, AlertLevel::None);
        prop_assert!(!status.should_alert);
    }

    /// Exceeded if and only if spending is strictly greater than the budget.
    #[test]
    fn test_exceeded_iff_strictly_over(
        amount_cents in 1i64..100_000_000,
        spending_cents in 0i64..200_000_000,
    ) {
        let amount = Decimal::new(amount_cents, 2);
        let spending = Decimal::new(spending_cents, 2);

        let status = BudgetService::evaluate(&budget_with_amount(amount), spending);

        prop_assert_eq!(status.status == SpendingStatus::Exceeded, spending > amount);
    }

    /// should_alert holds exactly at 80% and above, and always carries a message.
    #[test]
    fn test_should_alert_matches_threshold(
        amount_cents in 1i64..100_000_000,
        spending_cents in 0i64..200_000_000,
    ) {
        let amount = Decimal::new(amount_cents, 2);
        let spending = Decimal::new(spending_cents, 2);

        let status = BudgetService::evaluate(&budget_with_amount(amount), spending);

        prop_assert_eq!(status.should_alert, status.percentage_used >= INFO_THRESHOLD);
        prop_assert_eq!(status.alert_message.is_some(), status.should_alert);
        prop_assert_eq!(status.alert_level.is_alerting(), status.should_alert);
    }

    /// More spending against the same budget never lowers the alert level.
    #[test]
    fn test_alert_level_monotonic(
        amount_cents in 1i64..100_000_000,
        spending_cents in 0i64..200_000_000,
        extra_cents in 0i64..50_000_000,
    ) {
        let budget = budget_with_amount(Decimal::new(amount_cents, 2));
        let low = BudgetService::evaluate(&budget, Decimal::new(spending_cents, 2));
        let high = BudgetService::evaluate(&budget, Decimal::new(spending_cents + extra_cents, 2));

        prop_assert!(high.alert_level >= low.alert_level);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::amount::AmountError;
    use crate::budget::{Budget, BudgetError};
    use chrono::Utc;
    use rstest::rstest;
    use spendwatch_shared::types::{BudgetId, CategoryId, MonthYear, UserId};

    pub(super) fn test_budget(category: Option<(i64, &str)>, amount: Decimal) -> Budget {
        Budget {
            id: BudgetId::new(11),
            user_id: UserId::new(1),
            category_id: category.map(|(id, _)| CategoryId::new(id)),
            category_name: category.map(|(_, name)| name.to_string()),
            amount,
            month_year: MonthYear::parse("2024-06").expect("valid month"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(dec!(0), SpendingStatus::OnTrack, AlertLevel::None, false)]
    #[case(dec!(799.99), SpendingStatus::OnTrack, AlertLevel::None, false)]
    #[case(dec!(800), SpendingStatus::Warning, AlertLevel::Info, true)]
    #[case(dec!(899.99), SpendingStatus::Warning, AlertLevel::Info, true)]
    #[case(dec!(900), SpendingStatus::Critical, AlertLevel::Warning, true)]
    #[case(dec!(999.99), SpendingStatus::Critical, AlertLevel::Warning, true)]
    #[case(dec!(1000), SpendingStatus::Critical, AlertLevel::Alert, true)]
    #[case(dec!(1000.01), SpendingStatus::Exceeded, AlertLevel::Alert, true)]
    fn test_threshold_boundaries(
        #[case] spending: Decimal,
        #[case] status: SpendingStatus,
        #[case] level: AlertLevel,
        #[case] should_alert: bool,
    ) {
        let result = BudgetService::evaluate(&test_budget(None, dec!(1000)), spending);

        assert_eq!(result.status, status);
        assert_eq!(result.alert_level, level);
        assert_eq!(result.should_alert, should_alert);
    }

    #[test]
    fn test_overall_budget_at_85_percent() {
        let result = BudgetService::evaluate(&test_budget(None, dec!(1000)), dec!(850));

        assert_eq!(result.percentage_used, dec!(85));
        assert_eq!(result.remaining_budget, dec!(150));
        assert_eq!(result.status, SpendingStatus::Warning);
        assert_eq!(result.alert_level, AlertLevel::Info);
        assert!(result.should_alert);
        assert_eq!(result.category_name, "Overall");
        assert_eq!(
            result.alert_message.as_deref(),
            Some("Info: You've used 85.0% of your budget. ₹850.00 / ₹1,000.00.")
        );
    }

    #[test]
    fn test_spending_equal_to_budget_is_critical_not_exceeded() {
        let result = BudgetService::evaluate(&test_budget(None, dec!(1000)), dec!(1000.00));

        assert_eq!(result.percentage_used, dec!(100));
        assert_eq!(result.status, SpendingStatus::Critical);
        assert_eq!(result.alert_level, AlertLevel::Alert);
        assert_eq!(result.remaining_budget, dec!(0));
    }

    #[test]
    fn test_overspend_is_exceeded() {
        let result = BudgetService::evaluate(&test_budget(Some((2, "Food")), dec!(1000)), dec!(1050));

        assert_eq!(result.percentage_used, dec!(105));
        assert_eq!(result.status, SpendingStatus::Exceeded);
        assert_eq!(result.alert_level, AlertLevel::Alert);
        assert_eq!(result.remaining_budget, dec!(-50));
        assert_eq!(result.category_name, "Food");
    }

    #[test]
    fn test_eighty_percent_exactly_on_small_budget() {
        let budget = test_budget(None, dec!(100));
        assert!(BudgetService::evaluate(&budget, dec!(80.00)).should_alert);
        assert!(!BudgetService::evaluate(&budget, dec!(79.99)).should_alert);
    }

    #[test]
    fn test_zero_budget_with_spending_is_exceeded_without_alert() {
        let result = BudgetService::evaluate(&test_budget(None, dec!(0)), dec!(10));

        assert_eq!(result.percentage_used, dec!(0));
        assert_eq!(result.status, SpendingStatus::Exceeded);
        assert_eq!(result.alert_level, AlertLevel::None);
        assert!(result.alert_message.is_none());
    }

    #[test]
    fn test_compare_with_actual_rounds_percentage() {
        let budget = test_budget(Some((3, "Fuel")), dec!(300));
        let actual = crate::expense::SpendingSummary {
            total: dec!(100),
            expense_count: 3,
        };

        let report = BudgetService::compare_with_actual(&budget, &actual);

        assert_eq!(report.percentage_used, dec!(33.33));
        assert_eq!(report.difference, dec!(200));
        assert_eq!(report.expense_count, 3);
        assert!(!report.is_over_budget);
        assert_eq!(report.status, SpendingStatus::OnTrack);
    }

    #[test]
    fn test_compare_with_actual_over_budget() {
        let budget = test_budget(None, dec!(500));
        let actual = crate::expense::SpendingSummary {
            total: dec!(612.40),
            expense_count: 9,
        };

        let report = BudgetService::compare_with_actual(&budget, &actual);

        assert!(report.is_over_budget);
        assert_eq!(report.difference, dec!(-112.40));
        assert_eq!(report.status, SpendingStatus::Exceeded);
        assert_eq!(report.category_name, "Overall");
    }

    #[test]
    fn test_validate_amount() {
        assert!(BudgetService::validate_amount(dec!(0.01)).is_ok());
        assert_eq!(
            BudgetService::validate_amount(dec!(0)),
            Err(BudgetError::Amount(AmountError::NonPositive(dec!(0))))
        );
        assert!(BudgetService::validate_amount(dec!(-20)).is_err());
        // Would be stored as 0.00.
        assert_eq!(
            BudgetService::validate_amount(dec!(0.004)),
            Err(BudgetError::Amount(AmountError::TooManyDecimals(dec!(0.004))))
        );
    }

    #[test]
    fn test_status_serializes_with_display_labels() {
        let result = BudgetService::evaluate(&test_budget(None, dec!(1000)), dec!(100));
        let json = serde_json::to_value(&result).expect("serialize");

        assert_eq!(json["status"], "On Track");
        assert_eq!(json["alertLevel"], "None");
        assert_eq!(json["shouldAlert"], false);
        assert_eq!(json["monthYear"], "2024-06");
        assert!(json["categoryId"].is_null());
        assert!(json["alertMessage"].is_null());
    }
}
