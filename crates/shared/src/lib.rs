//! Shared types, errors, and configuration for Spendwatch.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - `MonthYear` budget period keys
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and validation

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
