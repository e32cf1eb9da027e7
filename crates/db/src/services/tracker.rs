//! Write paths that trigger budget alerts.
//!
//! Each write completes first, then the affected budget keys are checked in
//! order on the same task. Alert outcomes ride along with the result but never
//! turn a successful write into an error.

use std::time::Duration;

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use spendwatch_core::budget::{Budget, BudgetKey, NewBudget};
use spendwatch_core::expense::{Expense, ExpenseInput};
use spendwatch_shared::types::{BudgetId, ExpenseId, UserId};

use super::dispatcher::{AlertDispatcher, AlertOutcome};
use crate::repositories::{BudgetError, BudgetRepository, ExpenseError, ExpenseRepository};

/// A stored record plus the alert attempts its write triggered.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    /// The written record.
    pub record: T,
    /// One outcome per budget key checked.
    pub alerts: Vec<AlertOutcome>,
}

/// Expense and budget writes with alerting.
#[derive(Debug, Clone)]
pub struct ExpenseTracker {
    budgets: BudgetRepository,
    expenses: ExpenseRepository,
    dispatcher: AlertDispatcher,
}

impl ExpenseTracker {
    /// Creates a tracker whose alert attempts are bounded by `alert_timeout`.
    #[must_use]
    pub fn new(db: DatabaseConnection, alert_timeout: Duration) -> Self {
        let dispatcher = AlertDispatcher::new(db.clone(), alert_timeout);
        Self::with_dispatcher(db, dispatcher)
    }

    /// Creates a tracker that writes through `db` and alerts through
    /// `dispatcher`, which may sit on its own connection pool.
    #[must_use]
    pub fn with_dispatcher(db: DatabaseConnection, dispatcher: AlertDispatcher) -> Self {
        Self {
            budgets: BudgetRepository::new(db.clone()),
            expenses: ExpenseRepository::new(db),
            dispatcher,
        }
    }

    /// Budget store.
    #[must_use]
    pub const fn budgets(&self) -> &BudgetRepository {
        &self.budgets
    }

    /// Expense ledger.
    #[must_use]
    pub const fn expenses(&self) -> &ExpenseRepository {
        &self.expenses
    }

    /// Alert dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &AlertDispatcher {
        &self.dispatcher
    }

    /// Records an expense, confirms it, and checks the budgets it counts toward.
    ///
    /// # Errors
    ///
    /// Returns an error only if the expense itself could not be stored.
    pub async fn record_expense(
        &self,
        user_id: UserId,
        input: ExpenseInput,
    ) -> Result<Tracked<Expense>, ExpenseError> {
        let expense = self.expenses.create(user_id, input).await?;
        self.dispatcher.confirm_expense(&expense).await;
        let alerts = self.alert_for_expense(&expense).await;
        Ok(Tracked {
            record: expense,
            alerts,
        })
    }

    /// Replaces an expense and checks the budgets for its new date and category.
    /// Returns `None` if the expense does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only if the expense itself could not be updated.
    pub async fn update_expense(
        &self,
        id: ExpenseId,
        input: ExpenseInput,
    ) -> Result<Option<Tracked<Expense>>, ExpenseError> {
        let Some(expense) = self.expenses.update(id, input).await? else {
            return Ok(None);
        };
        let alerts = self.alert_for_expense(&expense).await;
        Ok(Some(Tracked {
            record: expense,
            alerts,
        }))
    }

    /// Deletes an expense. No alert, no cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<bool, ExpenseError> {
        self.expenses.delete(id).await
    }

    /// Creates a budget and checks it against spending already recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget could not be created, including a
    /// conflict on its key.
    pub async fn create_budget(&self, input: NewBudget) -> Result<Tracked<Budget>, BudgetError> {
        let budget = self.budgets.create(input).await?;
        let alerts = vec![self.dispatcher.check_and_alert(&budget.key()).await];
        Ok(Tracked {
            record: budget,
            alerts,
        })
    }

    /// Changes a budget's amount and re-checks it. Returns `None` if the budget
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is invalid or the update fails.
    pub async fn update_budget_amount(
        &self,
        id: BudgetId,
        amount: Decimal,
    ) -> Result<Option<Tracked<Budget>>, BudgetError> {
        if !self.budgets.update_amount(id, amount).await? {
            return Ok(None);
        }
        let Some(budget) = self.budgets.get_by_id(id).await? else {
            return Ok(None);
        };
        let alerts = vec![self.dispatcher.check_and_alert(&budget.key()).await];
        Ok(Some(Tracked {
            record: budget,
            alerts,
        }))
    }

    /// Deletes a budget. Expenses are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_budget(&self, id: BudgetId) -> Result<bool, BudgetError> {
        self.budgets.delete(id).await
    }

    /// The expense's category budget, then the overall budget, for the month of
    /// the expense date.
    async fn alert_for_expense(&self, expense: &Expense) -> Vec<AlertOutcome> {
        let category_key = expense.budget_key();
        let overall_key = BudgetKey::overall(expense.user_id, expense.month_year());

        let mut outcomes = Vec::with_capacity(2);
        outcomes.push(self.dispatcher.check_and_alert(&category_key).await);
        outcomes.push(self.dispatcher.check_and_alert(&overall_key).await);
        outcomes
    }
}
