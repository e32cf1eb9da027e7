//! Notification types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spendwatch_shared::types::{NotificationId, UserId};

use crate::budget::AlertLevel;

/// Notification severity shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Informational.
    Info,
    /// Needs attention.
    Warning,
    /// Budget exceeded or fully used.
    Alert,
    /// Confirmation of a completed action.
    Success,
}

impl NotificationKind {
    /// Stored name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Alert => "Alert",
            Self::Success => "Success",
        }
    }

    /// Kind used for a budget alert of the given level, if it alerts at all.
    #[must_use]
    pub const fn for_alert_level(level: AlertLevel) -> Option<Self> {
        match level {
            AlertLevel::None => None,
            AlertLevel::Info => Some(Self::Info),
            AlertLevel::Warning => Some(Self::Warning),
            AlertLevel::Alert => Some(Self::Alert),
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification content waiting to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    /// Recipient.
    pub user_id: UserId,
    /// Title line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    pub kind: NotificationKind,
}

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Notification ID.
    pub id: NotificationId,
    /// Recipient.
    pub user_id: UserId,
    /// Title line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Whether the user has read it.
    pub is_read: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// When it was marked read.
    pub read_at: Option<DateTime<Utc>>,
}
