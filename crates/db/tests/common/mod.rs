//! Shared setup for database integration tests.
//!
//! Each test gets its own in-memory SQLite database migrated with the real
//! `Migrator`. The pool is pinned to one connection because every SQLite
//! memory connection is a separate database.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use spendwatch_core::budget::NewBudget;
use spendwatch_core::expense::{ExpenseInput, ExpenseStatus, PaymentMethod};
use spendwatch_db::migration::{Migrator, MigratorTrait};
use spendwatch_db::{CategoryRepository, repositories::CreateCategoryInput};
use spendwatch_shared::types::{CategoryId, MonthYear, UserId};

/// Connects to a fresh migrated in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// A migrated SQLite file shared by two single-connection pools.
///
/// `writer` serves repositories and `alerts` serves a dispatcher, so a
/// test can occupy the alert pool without blocking writes.
pub struct SharedFileDb {
    pub writer: DatabaseConnection,
    pub alerts: DatabaseConnection,
    path: PathBuf,
}

impl Drop for SharedFileDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

async fn connect_single(url: &str) -> DatabaseConnection {
    let mut options = ConnectOptions::new(url);
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(options)
        .await
        .expect("Failed to connect to database file")
}

/// Creates a fresh migrated database file in the temp directory.
pub async fn setup_shared_file_db() -> SharedFileDb {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "spendwatch-test-{}-{nanos}.db",
        std::process::id()
    ));
    let url = format!("sqlite://{}?mode=rwc", path.display());

    let writer = connect_single(&url).await;
    Migrator::up(&writer, None)
        .await
        .expect("Failed to run migrations");
    let alerts = connect_single(&url).await;

    SharedFileDb {
        writer,
        alerts,
        path,
    }
}

/// Creates a system category and returns its ID.
pub async fn seed_category(db: &DatabaseConnection, name: &str) -> CategoryId {
    let category = CategoryRepository::new(db.clone())
        .create(CreateCategoryInput {
            name: name.to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create category");
    CategoryId::new(category.id)
}

pub fn month(value: &str) -> MonthYear {
    MonthYear::parse(value).expect("valid month")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn expense(category_id: CategoryId, amount: Decimal, expense_date: NaiveDate) -> ExpenseInput {
    ExpenseInput {
        category_id,
        amount,
        expense_date,
        description: Some("test expense".to_string()),
        payment_method: PaymentMethod::Card,
        status: ExpenseStatus::Approved,
    }
}

pub fn new_budget(
    user: i64,
    category_id: Option<CategoryId>,
    amount: Decimal,
    month_year: &str,
) -> NewBudget {
    NewBudget {
        user_id: UserId::new(user),
        category_id,
        amount,
        month_year: month(month_year),
    }
}
