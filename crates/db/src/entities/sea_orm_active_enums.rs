//! String-backed enums stored in the database.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use spendwatch_core::expense::{ExpenseStatus as CoreExpenseStatus, PaymentMethod as CorePaymentMethod};
use spendwatch_core::notification::NotificationKind;

/// `expenses.payment_method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "Cash")]
    Cash,
    #[sea_orm(string_value = "Card")]
    Card,
    #[sea_orm(string_value = "UPI")]
    Upi,
    #[sea_orm(string_value = "Net Banking")]
    NetBanking,
    #[sea_orm(string_value = "Others")]
    Others,
}

/// `expenses.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ExpenseStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Approved")]
    Approved,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
}

/// `notifications.notification_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum NotificationType {
    #[sea_orm(string_value = "Info")]
    Info,
    #[sea_orm(string_value = "Warning")]
    Warning,
    #[sea_orm(string_value = "Alert")]
    Alert,
    #[sea_orm(string_value = "Success")]
    Success,
}

impl From<CorePaymentMethod> for PaymentMethod {
    fn from(value: CorePaymentMethod) -> Self {
        match value {
            CorePaymentMethod::Cash => Self::Cash,
            CorePaymentMethod::Card => Self::Card,
            CorePaymentMethod::Upi => Self::Upi,
            CorePaymentMethod::NetBanking => Self::NetBanking,
            CorePaymentMethod::Others => Self::Others,
        }
    }
}

impl From<PaymentMethod> for CorePaymentMethod {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::Cash => Self::Cash,
            PaymentMethod::Card => Self::Card,
            PaymentMethod::Upi => Self::Upi,
            PaymentMethod::NetBanking => Self::NetBanking,
            PaymentMethod::Others => Self::Others,
        }
    }
}

impl From<CoreExpenseStatus> for ExpenseStatus {
    fn from(value: CoreExpenseStatus) -> Self {
        match value {
            CoreExpenseStatus::Pending => Self::Pending,
            CoreExpenseStatus::Approved => Self::Approved,
            CoreExpenseStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<ExpenseStatus> for CoreExpenseStatus {
    fn from(value: ExpenseStatus) -> Self {
        match value {
            ExpenseStatus::Pending => Self::Pending,
            ExpenseStatus::Approved => Self::Approved,
            ExpenseStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<NotificationKind> for NotificationType {
    fn from(value: NotificationKind) -> Self {
        match value {
            NotificationKind::Info => Self::Info,
            NotificationKind::Warning => Self::Warning,
            NotificationKind::Alert => Self::Alert,
            NotificationKind::Success => Self::Success,
        }
    }
}

impl From<NotificationType> for NotificationKind {
    fn from(value: NotificationType) -> Self {
        match value {
            NotificationType::Info => Self::Info,
            NotificationType::Warning => Self::Warning,
            NotificationType::Alert => Self::Alert,
            NotificationType::Success => Self::Success,
        }
    }
}
