//! Core business logic for Spendwatch.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Budget evaluation, alert decisions, and their message text live here.
//!
//! # Modules
//!
//! - `budget` - Budget status evaluation and budget-vs-actual
//! - `alert` - Notification and status-line text for alert levels
//! - `expense` - Expense records and spending aggregation types
//! - `notification` - Notification kinds and records
//! - `access` - Owner and admin access rules
//! - `amount` - Storable money amounts

pub mod access;
pub mod amount;
pub mod alert;
pub mod budget;
pub mod expense;
pub mod notification;
