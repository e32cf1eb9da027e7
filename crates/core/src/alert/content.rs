//! Notification and status-line text.

use rust_decimal::Decimal;
use spendwatch_shared::types::{MonthYear, UserId};

use super::format::{format_money, format_percent};
use crate::budget::{AlertLevel, BudgetStatus};
use crate::expense::SpendingSummary;
use crate::notification::{NotificationDraft, NotificationKind};

/// Short summary carried on a `BudgetStatus`. `None` below the alert threshold.
#[must_use]
pub fn status_line(
    level: AlertLevel,
    spending: Decimal,
    budget: Decimal,
    percentage_used: Decimal,
) -> Option<String> {
    let spent = format_money(spending);
    let limit = format_money(budget);
    let pct = format_percent(percentage_used);

    match level {
        AlertLevel::Alert => Some(format!(
            "Budget exceeded! You've spent {spent} of {limit} ({pct}%)."
        )),
        AlertLevel::Warning => Some(format!(
            "Warning: You've used {pct}% of your budget. {spent} / {limit}."
        )),
        AlertLevel::Info => Some(format!(
            "Info: You've used {pct}% of your budget. {spent} / {limit}."
        )),
        AlertLevel::None => None,
    }
}

/// Notification for an evaluated budget, or `None` if it should not alert.
#[must_use]
pub fn budget_alert(status: &BudgetStatus) -> Option<NotificationDraft> {
    if !status.should_alert {
        return None;
    }
    let kind = NotificationKind::for_alert_level(status.alert_level)?;

    let category = &status.category_name;
    let spent = format_money(status.current_spending);
    let limit = format_money(status.budget_amount);
    let pct = format_percent(status.percentage_used);

    let (title, message) = match kind {
        NotificationKind::Alert => (
            format!("🔴 Budget Exceeded: {category}"),
            format!(
                "You've exceeded your {category} budget! Current spending: {spent} / {limit} ({pct}%). Please review your expenses."
            ),
        ),
        NotificationKind::Warning => (
            format!("🟡 Budget Warning: {category}"),
            format!(
                "You've used {pct}% of your {category} budget. Current spending: {spent} / {limit}. Consider reducing expenses."
            ),
        ),
        NotificationKind::Info | NotificationKind::Success => (
            format!("🔵 Budget Alert: {category}"),
            format!(
                "You've used {pct}% of your {category} budget. Current spending: {spent} / {limit}"
            ),
        ),
    };

    Some(NotificationDraft {
        user_id: status.user_id,
        title,
        message,
        kind,
    })
}

/// Confirmation sent after an expense is recorded.
#[must_use]
pub fn expense_added(user_id: UserId, amount: Decimal, category_name: &str) -> NotificationDraft {
    NotificationDraft {
        user_id,
        title: "🟢 Expense Added Successfully".to_string(),
        message: format!(
            "Your expense of {} in {category_name} category has been recorded.",
            format_money(amount)
        ),
        kind: NotificationKind::Success,
    }
}

/// Month-end recap of spending.
#[must_use]
pub fn monthly_summary(
    user_id: UserId,
    month: MonthYear,
    summary: &SpendingSummary,
) -> NotificationDraft {
    NotificationDraft {
        user_id,
        title: format!("📊 Monthly Summary - {month}"),
        message: format!(
            "You spent {} across {} transactions this month. View detailed breakdown in reports.",
            format_money(summary.total),
            summary.expense_count
        ),
        kind: NotificationKind::Info,
    }
}
