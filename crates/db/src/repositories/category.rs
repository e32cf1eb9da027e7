//! Category repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use spendwatch_shared::types::{CategoryId, UserId};

use crate::entities::categories;

/// Input for creating a category.
#[derive(Debug, Clone, Default)]
pub struct CreateCategoryInput {
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional icon name.
    pub icon: Option<String>,
    /// Optional hex color.
    pub color_code: Option<String>,
    /// Owner of a custom category, `None` for system categories.
    pub user_id: Option<UserId>,
}

/// Repository for category operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category. Categories without an owner are system-wide.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateCategoryInput) -> Result<categories::Model, DbErr> {
        categories::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            icon: Set(input.icon),
            color_code: Set(input.color_code),
            user_id: Set(input.user_id.map(UserId::into_inner)),
            is_system: Set(input.user_id.is_none()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    /// Finds a category by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: CategoryId) -> Result<Option<categories::Model>, DbErr> {
        categories::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
    }

    /// Finds a system category by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_system_by_name(&self, name: &str) -> Result<Option<categories::Model>, DbErr> {
        categories::Entity::find()
            .filter(categories::Column::IsSystem.eq(true))
            .filter(categories::Column::Name.eq(name))
            .one(&self.db)
            .await
    }

    /// Lists system categories plus the user's own, by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_visible_to(&self, user_id: UserId) -> Result<Vec<categories::Model>, DbErr> {
        categories::Entity::find()
            .filter(
                Condition::any()
                    .add(categories::Column::IsSystem.eq(true))
                    .add(categories::Column::UserId.eq(user_id.into_inner())),
            )
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
    }
}
