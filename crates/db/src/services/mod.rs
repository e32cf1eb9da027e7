//! Services that combine repositories: alert dispatch and alerting write paths.

pub mod dispatcher;
pub mod tracker;

pub use dispatcher::{AlertDispatcher, AlertOutcome};
pub use tracker::{ExpenseTracker, Tracked};
