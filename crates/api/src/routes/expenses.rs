//! Expense routes. Writes go through the tracker so they trigger budget alerts.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use spendwatch_core::access::{AccessError, Requester};
use spendwatch_core::expense::{CategorySpending, Expense, ExpenseInput, SpendingQuery};
use spendwatch_shared::types::{ExpenseId, MonthYear};
use tracing::info;

use super::{PeriodQuery, alert_reports};
use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/summary", get(spending_summary))
        .route(
            "/expenses/{expense_id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

/// Spending for one month.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingReport {
    /// Month covered.
    pub month_year: MonthYear,
    /// Total across every category.
    pub total: Decimal,
    /// Number of expenses.
    pub expense_count: u64,
    /// Per-category totals, largest first.
    pub by_category: Vec<CategorySpending>,
}

async fn load_expense(
    state: &AppState,
    requester: Requester,
    id: ExpenseId,
) -> ApiResult<Expense> {
    let expense = state
        .tracker()
        .expenses()
        .get_by_id(id)
        .await?
        .ok_or(AccessError::NotFound)?;
    requester.ensure_owner_or_admin(expense.user_id)?;
    Ok(expense)
}

/// POST /expenses
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ExpenseInput>,
) -> ApiResult<impl IntoResponse> {
    let tracked = state
        .tracker()
        .record_expense(auth.user_id(), payload)
        .await?;

    info!(
        expense_id = %tracked.record.id,
        user_id = %tracked.record.user_id,
        amount = %tracked.record.amount,
        "Expense recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "expense": tracked.record,
            "alerts": alert_reports(&tracked.alerts),
        })),
    ))
}

/// GET /expenses?monthYear=
async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<impl IntoResponse> {
    let expenses = state
        .tracker()
        .expenses()
        .list_for_owner(auth.user_id(), query.month()?)
        .await?;
    Ok(Json(expenses))
}

/// GET /expenses/{expense_id}
async fn get_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(expense_id): Path<ExpenseId>,
) -> ApiResult<impl IntoResponse> {
    let expense = load_expense(&state, auth.requester(), expense_id).await?;
    Ok(Json(expense))
}

/// PUT /expenses/{expense_id}
async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(expense_id): Path<ExpenseId>,
    Json(payload): Json<ExpenseInput>,
) -> ApiResult<impl IntoResponse> {
    load_expense(&state, auth.requester(), expense_id).await?;
    let tracked = state
        .tracker()
        .update_expense(expense_id, payload)
        .await?
        .ok_or(AccessError::NotFound)?;

    info!(expense_id = %expense_id, "Expense updated");

    Ok(Json(json!({
        "expense": tracked.record,
        "alerts": alert_reports(&tracked.alerts),
    })))
}

/// DELETE /expenses/{expense_id}
async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(expense_id): Path<ExpenseId>,
) -> ApiResult<impl IntoResponse> {
    load_expense(&state, auth.requester(), expense_id).await?;
    if !state.tracker().delete_expense(expense_id).await? {
        return Err(AccessError::NotFound.into());
    }

    info!(expense_id = %expense_id, "Expense deleted");
    Ok(Json(json!({ "message": "Expense deleted successfully" })))
}

/// GET /expenses/summary?monthYear=
async fn spending_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<impl IntoResponse> {
    let month = query.month_or_current()?;
    let spending = state.spending();
    let summary = spending
        .summary(&SpendingQuery::overall(auth.user_id(), month))
        .await?;
    let by_category = spending.by_category(auth.user_id(), month).await?;

    Ok(Json(SpendingReport {
        month_year: month,
        total: summary.total,
        expense_count: summary.expense_count,
        by_category,
    }))
}
