//! Expense and spending aggregation types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spendwatch_shared::types::{CategoryId, ExpenseId, MonthYear, UserId};

use crate::budget::BudgetKey;

/// How an expense was paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash.
    #[default]
    Cash,
    /// Debit or credit card.
    Card,
    /// Unified Payments Interface.
    #[serde(rename = "UPI")]
    Upi,
    /// Net banking transfer.
    #[serde(rename = "Net Banking")]
    NetBanking,
    /// Anything else.
    Others,
}

impl PaymentMethod {
    /// Stored name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::Upi => "UPI",
            Self::NetBanking => "Net Banking",
            Self::Others => "Others",
        }
    }
}

/// Approval state of an expense. Every state counts toward spending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseStatus {
    /// Awaiting review.
    Pending,
    /// Accepted.
    #[default]
    Approved,
    /// Rejected.
    Rejected,
}

impl ExpenseStatus {
    /// Stored name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

/// A recorded expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owning user.
    pub user_id: UserId,
    /// Category.
    pub category_id: CategoryId,
    /// Category display name, when known.
    pub category_name: Option<String>,
    /// Amount spent.
    pub amount: Decimal,
    /// Calendar date of the expense.
    pub expense_date: NaiveDate,
    /// Free text.
    pub description: Option<String>,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Approval state.
    pub status: ExpenseStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Month the expense is counted in.
    #[must_use]
    pub fn month_year(&self) -> MonthYear {
        MonthYear::from_date(self.expense_date)
    }

    /// Key of the category budget this expense counts toward.
    #[must_use]
    pub fn budget_key(&self) -> BudgetKey {
        BudgetKey::new(self.user_id, Some(self.category_id), self.month_year())
    }
}

/// Fields supplied when recording or replacing an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    /// Category.
    pub category_id: CategoryId,
    /// Amount spent.
    pub amount: Decimal,
    /// Calendar date of the expense.
    pub expense_date: NaiveDate,
    /// Free text.
    #[serde(default)]
    pub description: Option<String>,
    /// Payment method.
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Approval state.
    #[serde(default)]
    pub status: ExpenseStatus,
}

/// Selects the expenses counted for a budget: one owner, one month, and
/// optionally one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpendingQuery {
    /// Owning user.
    pub user_id: UserId,
    /// Category filter, `None` for every category.
    pub category_id: Option<CategoryId>,
    /// Calendar month.
    pub month: MonthYear,
}

impl SpendingQuery {
    /// Spending across every category for a month.
    #[must_use]
    pub const fn overall(user_id: UserId, month: MonthYear) -> Self {
        Self {
            user_id,
            category_id: None,
            month,
        }
    }
}

impl From<&BudgetKey> for SpendingQuery {
    fn from(key: &BudgetKey) -> Self {
        Self {
            user_id: key.user_id,
            category_id: key.category_id,
            month: key.month_year,
        }
    }
}

/// Total and count of the expenses matched by a `SpendingQuery`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    /// Sum of amounts, two decimal places.
    pub total: Decimal,
    /// Number of expenses.
    pub expense_count: u64,
}

/// Spending of one category in a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    /// Category.
    pub category_id: CategoryId,
    /// Category display name.
    pub category_name: String,
    /// Sum of amounts, two decimal places.
    pub total: Decimal,
    /// Number of expenses.
    pub expense_count: u64,
}
