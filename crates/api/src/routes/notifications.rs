//! Notification routes. Notifications are visible to their owner only.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use spendwatch_core::access::AccessError;
use spendwatch_core::budget::BudgetKey;
use spendwatch_core::notification::Notification;
use spendwatch_shared::types::{CategoryId, MonthYear, NotificationId};
use tracing::info;

use super::AlertReport;
use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the notification routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/budget-alert", post(check_budget_alert))
        .route("/notifications/monthly-summary", post(monthly_summary))
        .route("/notifications/{notification_id}/read", put(mark_read))
        .route("/notifications/{notification_id}", delete(delete_notification))
}

/// Request body for a manual budget check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlertRequest {
    /// Category, or absent for the overall budget.
    pub category_id: Option<CategoryId>,
    /// Month as `YYYY-MM`.
    pub month_year: String,
}

/// Request body for a monthly summary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummaryRequest {
    /// Month as `YYYY-MM`.
    pub month_year: String,
}

async fn load_own_notification(
    state: &AppState,
    auth: &AuthUser,
    id: NotificationId,
) -> ApiResult<Notification> {
    let notification = state
        .notifications()
        .get_by_id(id)
        .await?
        .ok_or(AccessError::NotFound)?;
    auth.requester().ensure_owner(notification.user_id)?;
    Ok(notification)
}

/// GET /notifications
async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let notifications = state.notifications().list_for_owner(auth.user_id()).await?;
    Ok(Json(notifications))
}

/// GET /notifications/unread-count
async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let count = state.notifications().unread_count(auth.user_id()).await?;
    Ok(Json(json!({ "count": count })))
}

/// PUT /notifications/{notification_id}/read
async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<NotificationId>,
) -> ApiResult<impl IntoResponse> {
    load_own_notification(&state, &auth, notification_id).await?;
    let notifications = state.notifications();
    notifications.mark_read(notification_id).await?;
    let updated = notifications
        .get_by_id(notification_id)
        .await?
        .ok_or(AccessError::NotFound)?;
    Ok(Json(updated))
}

/// DELETE /notifications/{notification_id}
async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<NotificationId>,
) -> ApiResult<impl IntoResponse> {
    load_own_notification(&state, &auth, notification_id).await?;
    if !state.notifications().delete(notification_id).await? {
        return Err(AccessError::NotFound.into());
    }
    Ok(Json(json!({ "message": "Notification deleted successfully" })))
}

/// POST /notifications/budget-alert
///
/// Runs the alert check for one of the caller's budgets on demand.
async fn check_budget_alert(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BudgetAlertRequest>,
) -> ApiResult<impl IntoResponse> {
    let month_year = MonthYear::parse(&payload.month_year)?;
    let key = BudgetKey::new(auth.user_id(), payload.category_id, month_year);
    let outcome = state.dispatcher().check_and_alert(&key).await;
    Ok(Json(AlertReport::from(&outcome)))
}

/// POST /notifications/monthly-summary
async fn monthly_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<MonthlySummaryRequest>,
) -> ApiResult<impl IntoResponse> {
    let month_year = MonthYear::parse(&payload.month_year)?;
    let notification = state
        .dispatcher()
        .send_monthly_summary(auth.user_id(), month_year)
        .await?;

    info!(
        user_id = %auth.user_id(),
        month_year = %month_year,
        "Monthly summary requested"
    );
    Ok((StatusCode::CREATED, Json(notification)))
}
