//! Rendering of domain and store errors as JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use spendwatch_core::access::AccessError;
use spendwatch_db::{BudgetError, ExpenseError};
use spendwatch_shared::AppError;
use spendwatch_shared::types::MonthYearError;
use tracing::error;

/// Handler error. Wraps `AppError` so it can be turned into a response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Shorthand for a missing record.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Storage details stay in the log.
        let message = match &self.0 {
            AppError::Database(detail) | AppError::Internal(detail) => {
                error!(error = %detail, "Request failed");
                "Internal server error".to_string()
            }
            AppError::Unauthorized(m)
            | AppError::Forbidden(m)
            | AppError::NotFound(m)
            | AppError::Validation(m)
            | AppError::Conflict(m) => m.clone(),
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        let app = match err {
            BudgetError::NotFound(_) | BudgetError::CategoryNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            BudgetError::Conflict { .. } => AppError::Conflict(err.to_string()),
            BudgetError::Invalid(_) => AppError::Validation(err.to_string()),
            BudgetError::StoredMonth(_) => AppError::Internal(err.to_string()),
            BudgetError::Database(e) => AppError::Database(e.to_string()),
        };
        Self(app)
    }
}

impl From<ExpenseError> for ApiError {
    fn from(err: ExpenseError) -> Self {
        let app = match err {
            ExpenseError::NotFound(_) | ExpenseError::CategoryNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            ExpenseError::Invalid(_) => AppError::Validation(err.to_string()),
            ExpenseError::Database(e) => AppError::Database(e.to_string()),
        };
        Self(app)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound => Self(AppError::NotFound(err.to_string())),
            AccessError::Forbidden => Self(AppError::Forbidden(err.to_string())),
        }
    }
}

impl From<MonthYearError> for ApiError {
    fn from(err: MonthYearError) -> Self {
        Self(AppError::from(err))
    }
}
