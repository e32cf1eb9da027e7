//! Repository layer for database operations.

pub mod budget;
pub mod category;
pub mod expense;
pub mod notification;
pub mod spending;

pub use budget::{BudgetError, BudgetRepository};
pub use category::{CategoryRepository, CreateCategoryInput};
pub use expense::{ExpenseError, ExpenseRepository};
pub use notification::NotificationRepository;
pub use spending::SpendingRepository;
