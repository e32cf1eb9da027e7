//! API route definitions.

use axum::{Router, middleware};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use spendwatch_core::budget::AlertLevel;
use spendwatch_db::AlertOutcome;
use spendwatch_shared::types::{CategoryId, MonthYear, NotificationId};

use crate::{AppState, error::ApiResult, middleware::auth_middleware};

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod health;
pub mod notifications;

/// Creates the API router. Everything except the health check requires a
/// bearer token.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(budgets::routes())
        .merge(categories::routes())
        .merge(expenses::routes())
        .merge(notifications::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}

/// `?monthYear=&categoryId=` filters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    /// Month as `YYYY-MM`. Defaults to the current month where optional.
    pub month_year: Option<String>,
    /// Category filter.
    pub category_id: Option<CategoryId>,
}

impl PeriodQuery {
    /// The requested month, or the current one.
    pub fn month_or_current(&self) -> ApiResult<MonthYear> {
        match self.month_year.as_deref() {
            Some(raw) => Ok(MonthYear::parse(raw)?),
            None => Ok(MonthYear::from_date(Utc::now().date_naive())),
        }
    }

    /// The requested month, if any.
    pub fn month(&self) -> ApiResult<Option<MonthYear>> {
        Ok(self.month_year.as_deref().map(MonthYear::parse).transpose()?)
    }
}

/// What an alert attempt did, as reported to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertReport {
    /// `notified`, `belowThreshold`, `noBudget`, `failed`, or `timedOut`.
    pub outcome: &'static str,
    /// Severity, when a notification was stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<AlertLevel>,
    /// Stored notification, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<NotificationId>,
}

impl From<&AlertOutcome> for AlertReport {
    fn from(outcome: &AlertOutcome) -> Self {
        let (name, level, notification_id) = match outcome {
            AlertOutcome::NoBudget => ("noBudget", None, None),
            AlertOutcome::BelowThreshold => ("belowThreshold", None, None),
            AlertOutcome::Notified {
                level,
                notification_id,
            } => ("notified", Some(*level), Some(*notification_id)),
            AlertOutcome::Failed => ("failed", None, None),
            AlertOutcome::TimedOut => ("timedOut", None, None),
        };
        Self {
            outcome: name,
            level,
            notification_id,
        }
    }
}

pub(crate) fn alert_reports(outcomes: &[AlertOutcome]) -> Vec<AlertReport> {
    outcomes.iter().map(AlertReport::from).collect()
}
