//! Budget routes: the budget store, status lookups, and budget-vs-actual.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use spendwatch_core::access::{AccessError, Requester};
use spendwatch_core::budget::{Budget, BudgetKey, NewBudget};
use spendwatch_shared::types::{BudgetId, CategoryId, MonthYear};
use tracing::info;

use super::{PeriodQuery, alert_reports};
use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
};

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/all", get(list_all_budgets))
        .route("/budgets/status", get(budget_status))
        .route("/budgets/vs-actual", get(budget_vs_actual))
        .route(
            "/budgets/{budget_id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
}

/// Request body for creating a budget.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetRequest {
    /// Category, or absent for the overall budget.
    pub category_id: Option<CategoryId>,
    /// Monthly limit.
    pub amount: Decimal,
    /// Month as `YYYY-MM`.
    pub month_year: String,
}

/// Request body for changing a budget's amount.
#[derive(Debug, Deserialize)]
pub struct UpdateBudgetRequest {
    /// New monthly limit.
    pub amount: Decimal,
}

async fn load_budget(state: &AppState, requester: Requester, id: BudgetId) -> ApiResult<Budget> {
    let budget = state
        .budgets()
        .get_by_id(id)
        .await?
        .ok_or(AccessError::NotFound)?;
    requester.ensure_owner_or_admin(budget.user_id)?;
    Ok(budget)
}

/// POST /budgets
async fn create_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateBudgetRequest>,
) -> ApiResult<impl IntoResponse> {
    let month_year = MonthYear::parse(&payload.month_year)?;
    let tracked = state
        .tracker()
        .create_budget(NewBudget {
            user_id: auth.user_id(),
            category_id: payload.category_id,
            amount: payload.amount,
            month_year,
        })
        .await?;

    info!(
        budget_id = %tracked.record.id,
        user_id = %tracked.record.user_id,
        month_year = %month_year,
        "Budget created"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "budget": tracked.record,
            "alerts": alert_reports(&tracked.alerts),
        })),
    ))
}

/// GET /budgets?monthYear=
///
/// The caller's budgets for a month, each evaluated against current spending.
async fn list_budgets(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<impl IntoResponse> {
    let month = query.month_or_current()?;
    let statuses = state
        .budgets()
        .statuses_for_month(auth.user_id(), month)
        .await?;
    Ok(Json(statuses))
}

/// GET /budgets/all
async fn list_all_budgets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let budgets = state.budgets().list_all_for_owner(auth.user_id()).await?;
    Ok(Json(budgets))
}

/// GET /budgets/{budget_id}
async fn get_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(budget_id): Path<BudgetId>,
) -> ApiResult<impl IntoResponse> {
    let budget = load_budget(&state, auth.requester(), budget_id).await?;
    let status = state.budgets().evaluate(&budget).await?;
    Ok(Json(status))
}

/// PUT /budgets/{budget_id}
async fn update_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(budget_id): Path<BudgetId>,
    Json(payload): Json<UpdateBudgetRequest>,
) -> ApiResult<impl IntoResponse> {
    load_budget(&state, auth.requester(), budget_id).await?;
    let tracked = state
        .tracker()
        .update_budget_amount(budget_id, payload.amount)
        .await?
        .ok_or(AccessError::NotFound)?;

    info!(budget_id = %budget_id, amount = %payload.amount, "Budget updated");

    Ok(Json(json!({
        "budget": tracked.record,
        "alerts": alert_reports(&tracked.alerts),
    })))
}

/// DELETE /budgets/{budget_id}
async fn delete_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(budget_id): Path<BudgetId>,
) -> ApiResult<impl IntoResponse> {
    load_budget(&state, auth.requester(), budget_id).await?;
    if !state.tracker().delete_budget(budget_id).await? {
        return Err(AccessError::NotFound.into());
    }

    info!(budget_id = %budget_id, "Budget deleted");
    Ok(Json(json!({ "message": "Budget deleted successfully" })))
}

/// GET /budgets/status?monthYear=&categoryId=
///
/// Without `categoryId` this is the overall budget.
async fn budget_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<impl IntoResponse> {
    let key = BudgetKey::new(auth.user_id(), query.category_id, query.month_or_current()?);
    let status = state
        .budgets()
        .status_for_key(&key)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No budget set for {}", key.month_year)))?;
    Ok(Json(status))
}

/// GET /budgets/vs-actual?monthYear=&categoryId=
///
/// Without `categoryId` this is the overall budget.
async fn budget_vs_actual(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<impl IntoResponse> {
    let key = BudgetKey::new(auth.user_id(), query.category_id, query.month_or_current()?);
    let report = state
        .budgets()
        .vs_actual(&key)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No budget set for {}", key.month_year)))?;
    Ok(Json(report))
}
