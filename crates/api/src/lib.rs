//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - Budget, expense, category, and notification routes
//! - Authentication middleware
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sea_orm::DatabaseConnection;
use spendwatch_db::{
    AlertDispatcher, BudgetRepository, CategoryRepository, ExpenseTracker, NotificationRepository,
    SpendingRepository,
};
use spendwatch_shared::JwtService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Upper bound on each best-effort alert attempt.
    pub alert_timeout: Duration,
}

impl AppState {
    /// Expense and budget writes with alerting.
    #[must_use]
    pub fn tracker(&self) -> ExpenseTracker {
        ExpenseTracker::with_dispatcher((*self.db).clone(), self.dispatcher())
    }

    /// Alert dispatcher for manual checks and summaries.
    #[must_use]
    pub fn dispatcher(&self) -> AlertDispatcher {
        AlertDispatcher::new((*self.db).clone(), self.alert_timeout)
    }

    /// Budget store.
    #[must_use]
    pub fn budgets(&self) -> BudgetRepository {
        BudgetRepository::new((*self.db).clone())
    }

    /// Category catalogue.
    #[must_use]
    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new((*self.db).clone())
    }

    /// Spending aggregation.
    #[must_use]
    pub fn spending(&self) -> SpendingRepository {
        SpendingRepository::new((*self.db).clone())
    }

    /// Notification store.
    #[must_use]
    pub fn notifications(&self) -> NotificationRepository {
        NotificationRepository::new((*self.db).clone())
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
