//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repositories for budgets, expenses, categories, and notifications
//! - Spending aggregation queries
//! - The alert dispatcher and the write paths that trigger it
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod services;

pub use repositories::{
    BudgetError, BudgetRepository, CategoryRepository, ExpenseError, ExpenseRepository,
    NotificationRepository, SpendingRepository,
};
pub use services::{AlertDispatcher, AlertOutcome, ExpenseTracker, Tracked};

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use spendwatch_shared::config::DatabaseConfig;

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection using application configuration.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);
    Database::connect(options).await
}
