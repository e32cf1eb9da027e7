//! Notification store.
//!
//! Ownership is checked by callers. This store only reads and writes rows.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, sea_query::Expr,
};
use spendwatch_core::notification::{Notification, NotificationDraft};
use spendwatch_shared::types::{NotificationId, UserId};

use crate::entities::notifications;

/// Repository for notification operations.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    db: DatabaseConnection,
}

impl NotificationRepository {
    /// Creates a new notification repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new unread notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, draft: NotificationDraft) -> Result<Notification, DbErr> {
        let model = notifications::ActiveModel {
            user_id: Set(draft.user_id.into_inner()),
            title: Set(draft.title),
            message: Set(draft.message),
            notification_type: Set(draft.kind.into()),
            is_read: Set(false),
            created_at: Set(Utc::now()),
            read_at: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(to_domain(model))
    }

    /// Lists a user's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_owner(&self, user_id: UserId) -> Result<Vec<Notification>, DbErr> {
        Ok(notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(notifications::Column::CreatedAt)
            .order_by_desc(notifications::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect())
    }

    /// Number of unread notifications for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn unread_count(&self, user_id: UserId) -> Result<u64, DbErr> {
        notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id.into_inner()))
            .filter(notifications::Column::IsRead.eq(false))
            .count(&self.db)
            .await
    }

    /// Marks a notification read and stamps the read time. Returns false if it
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_read(&self, id: NotificationId) -> Result<bool, DbErr> {
        let result = notifications::Entity::update_many()
            .col_expr(notifications::Column::IsRead, Expr::value(true))
            .col_expr(notifications::Column::ReadAt, Expr::value(Some(Utc::now())))
            .filter(notifications::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Deletes a notification. Returns false if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: NotificationId) -> Result<bool, DbErr> {
        let result = notifications::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Gets a notification by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_by_id(&self, id: NotificationId) -> Result<Option<Notification>, DbErr> {
        Ok(notifications::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(to_domain))
    }
}

fn to_domain(model: notifications::Model) -> Notification {
    Notification {
        id: NotificationId::new(model.id),
        user_id: UserId::new(model.user_id),
        title: model.title,
        message: model.message,
        kind: model.notification_type.into(),
        is_read: model.is_read,
        created_at: model.created_at,
        read_at: model.read_at,
    }
}
