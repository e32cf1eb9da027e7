//! Alert dispatcher: evaluates a budget key and stores a notification when it
//! crosses a threshold.
//!
//! Every entry point here is best-effort. Failures and timeouts are logged and
//! reported as an [`AlertOutcome`], never returned as errors, so a failed alert
//! cannot fail the write that triggered it.

use std::time::Duration;

use sea_orm::{DatabaseConnection, DbErr};
use spendwatch_core::alert;
use spendwatch_core::budget::{AlertLevel, BudgetKey};
use spendwatch_core::expense::{Expense, SpendingQuery};
use spendwatch_core::notification::{Notification, NotificationDraft};
use spendwatch_shared::types::{MonthYear, NotificationId, UserId};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::repositories::{BudgetError, BudgetRepository, NotificationRepository, SpendingRepository};

/// What a best-effort alert attempt did. Callers may ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    /// No budget exists for the key; nothing to alert on.
    NoBudget,
    /// The budget is below the alert threshold.
    BelowThreshold,
    /// A notification was stored.
    Notified {
        /// Severity of the alert.
        level: AlertLevel,
        /// Stored notification.
        notification_id: NotificationId,
    },
    /// A lookup or write failed. Already logged.
    Failed,
    /// The attempt exceeded the configured timeout and was abandoned.
    TimedOut,
}

impl AlertOutcome {
    /// Whether a notification was stored.
    #[must_use]
    pub const fn notified(&self) -> bool {
        matches!(self, Self::Notified { .. })
    }
}

#[derive(Debug, thiserror::Error)]
enum DispatchError {
    #[error(transparent)]
    Budget(#[from] BudgetError),
    #[error("Notification write failed: {0}")]
    Notification(DbErr),
}

/// Evaluates budgets and stores alert notifications.
#[derive(Debug, Clone)]
pub struct AlertDispatcher {
    budgets: BudgetRepository,
    notifications: NotificationRepository,
    spending: SpendingRepository,
    timeout: Duration,
}

impl AlertDispatcher {
    /// Creates a dispatcher whose attempts are abandoned after `timeout`.
    #[must_use]
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self {
            budgets: BudgetRepository::new(db.clone()),
            notifications: NotificationRepository::new(db.clone()),
            spending: SpendingRepository::new(db),
            timeout,
        }
    }

    /// Looks up the budget for `key`, evaluates it against current spending,
    /// and stores a notification if it should alert.
    ///
    /// Repeated calls at the same level store a notification each time.
    pub async fn check_and_alert(&self, key: &BudgetKey) -> AlertOutcome {
        match timeout(self.timeout, self.try_check_and_alert(key)).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                error!(
                    user_id = %key.user_id,
                    month_year = %key.month_year,
                    error = %e,
                    "Budget alert failed"
                );
                AlertOutcome::Failed
            }
            Err(_) => {
                warn!(
                    user_id = %key.user_id,
                    month_year = %key.month_year,
                    timeout_ms = self.timeout_ms(),
                    "Budget alert timed out"
                );
                AlertOutcome::TimedOut
            }
        }
    }

    /// Stores the "expense added" confirmation for a recorded expense.
    pub async fn confirm_expense(&self, expense: &Expense) -> Option<Notification> {
        let category = expense.category_name.as_deref().unwrap_or("Uncategorized");
        let draft = alert::expense_added(expense.user_id, expense.amount, category);
        self.deliver(draft).await
    }

    /// Stores a monthly spending summary for the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the spending query or the notification write fails.
    /// Unlike alerts this is a direct user request, so failures surface.
    pub async fn send_monthly_summary(
        &self,
        user_id: UserId,
        month: MonthYear,
    ) -> Result<Notification, DbErr> {
        let summary = self
            .spending
            .summary(&SpendingQuery::overall(user_id, month))
            .await?;
        let notification = self
            .notifications
            .create(alert::monthly_summary(user_id, month, &summary))
            .await?;
        info!(user_id = %user_id, month_year = %month, "Monthly summary sent");
        Ok(notification)
    }

    /// Best-effort write of a system notification.
    async fn deliver(&self, draft: NotificationDraft) -> Option<Notification> {
        let user_id = draft.user_id;
        match timeout(self.timeout, self.notifications.create(draft)).await {
            Ok(Ok(notification)) => Some(notification),
            Ok(Err(e)) => {
                error!(user_id = %user_id, error = %e, "Notification write failed");
                None
            }
            Err(_) => {
                warn!(
                    user_id = %user_id,
                    timeout_ms = self.timeout_ms(),
                    "Notification write timed out"
                );
                None
            }
        }
    }

    async fn try_check_and_alert(&self, key: &BudgetKey) -> Result<AlertOutcome, DispatchError> {
        let Some(status) = self.budgets.status_for_key(key).await? else {
            debug!(user_id = %key.user_id, month_year = %key.month_year, "No budget to alert on");
            return Ok(AlertOutcome::NoBudget);
        };

        let Some(draft) = alert::budget_alert(&status) else {
            return Ok(AlertOutcome::BelowThreshold);
        };

        let notification = self
            .notifications
            .create(draft)
            .await
            .map_err(DispatchError::Notification)?;

        info!(
            user_id = %status.user_id,
            budget_id = %status.budget_id,
            level = ?status.alert_level,
            percentage_used = %status.percentage_used.round_dp(1),
            "Budget alert sent"
        );

        Ok(AlertOutcome::Notified {
            level: status.alert_level,
            notification_id: notification.id,
        })
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}
