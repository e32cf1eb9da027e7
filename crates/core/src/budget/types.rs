//! Budget domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spendwatch_shared::types::{BudgetId, CategoryId, MonthYear, UserId};

/// Label used for budgets without a category.
pub const OVERALL_LABEL: &str = "Overall";

/// Percentage at which a budget starts alerting.
pub const INFO_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Percentage at which a budget is considered critical.
pub const WARNING_THRESHOLD: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Percentage at which a budget is fully consumed.
pub const ALERT_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// Identity of a budget: owner, optional category, and month.
///
/// `category_id == None` is the overall budget for the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetKey {
    /// Owning user.
    pub user_id: UserId,
    /// Category, or `None` for the overall budget.
    pub category_id: Option<CategoryId>,
    /// Budget month.
    pub month_year: MonthYear,
}

impl BudgetKey {
    /// Create a key.
    #[must_use]
    pub const fn new(user_id: UserId, category_id: Option<CategoryId>, month_year: MonthYear) -> Self {
        Self {
            user_id,
            category_id,
            month_year,
        }
    }

    /// Key of the overall budget for a month.
    #[must_use]
    pub const fn overall(user_id: UserId, month_year: MonthYear) -> Self {
        Self::new(user_id, None, month_year)
    }
}

/// A stored spending limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Owning user.
    pub user_id: UserId,
    /// Category, or `None` for the overall budget.
    pub category_id: Option<CategoryId>,
    /// Category display name, when the category is known.
    pub category_name: Option<String>,
    /// Limit for the month. Always positive once stored.
    pub amount: Decimal,
    /// Budget month.
    pub month_year: MonthYear,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// The identity of this budget.
    #[must_use]
    pub const fn key(&self) -> BudgetKey {
        BudgetKey::new(self.user_id, self.category_id, self.month_year)
    }

    /// Category name, or "Overall" when there is none.
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category_name.as_deref().unwrap_or(OVERALL_LABEL)
    }
}

/// Input for creating a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    /// Owning user.
    pub user_id: UserId,
    /// Category, or `None` for the overall budget.
    pub category_id: Option<CategoryId>,
    /// Limit for the month.
    pub amount: Decimal,
    /// Budget month.
    pub month_year: MonthYear,
}

impl NewBudget {
    /// The identity the new budget will have.
    #[must_use]
    pub const fn key(&self) -> BudgetKey {
        BudgetKey::new(self.user_id, self.category_id, self.month_year)
    }
}

/// Human-facing health label for a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpendingStatus {
    /// Below 80% of the limit.
    #[serde(rename = "On Track")]
    OnTrack,
    /// At least 80% used.
    Warning,
    /// At least 90% used, not yet over the limit.
    Critical,
    /// Spending strictly above the limit.
    Exceeded,
}

impl SpendingStatus {
    /// Display string used in API payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
            Self::Exceeded => "Exceeded",
        }
    }
}

impl std::fmt::Display for SpendingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a budget alert, ordered from quietest to loudest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertLevel {
    /// Below 80%.
    None,
    /// 80% or more.
    Info,
    /// 90% or more.
    Warning,
    /// 100% or more.
    Alert,
}

impl AlertLevel {
    /// Whether this level produces a notification.
    #[must_use]
    pub const fn is_alerting(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Budget evaluated against current spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Owning user.
    pub user_id: UserId,
    /// Category, or `None` for the overall budget.
    pub category_id: Option<CategoryId>,
    /// Category name, "Overall" when there is none.
    pub category_name: String,
    /// Budget month.
    pub month_year: MonthYear,
    /// Limit.
    pub budget_amount: Decimal,
    /// Spending counted against the limit.
    pub current_spending: Decimal,
    /// `budget_amount - current_spending`, negative when over.
    pub remaining_budget: Decimal,
    /// Unrounded share of the limit used, in percent.
    pub percentage_used: Decimal,
    /// Health label.
    pub status: SpendingStatus,
    /// Alert severity.
    pub alert_level: AlertLevel,
    /// Whether a notification should be raised.
    pub should_alert: bool,
    /// One-line summary for alerting levels.
    pub alert_message: Option<String>,
}

/// Budget compared with the month's actual spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetVsActual {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Category, or `None` for the overall budget.
    pub category_id: Option<CategoryId>,
    /// Category name, "Overall" when there is none.
    pub category_name: String,
    /// Budget month.
    pub month_year: MonthYear,
    /// Limit.
    pub budget_amount: Decimal,
    /// Spending in scope for the budget.
    pub actual_spending: Decimal,
    /// Number of expenses in scope.
    pub expense_count: u64,
    /// `budget_amount - actual_spending`.
    pub difference: Decimal,
    /// Share used, rounded to two places.
    pub percentage_used: Decimal,
    /// Whether spending is strictly above the limit.
    pub is_over_budget: bool,
    /// Health label.
    pub status: SpendingStatus,
}
