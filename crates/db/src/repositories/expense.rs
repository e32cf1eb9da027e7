//! Expense ledger repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use spendwatch_core::expense::{Expense, ExpenseError as ExpenseRuleError, ExpenseInput};
use spendwatch_shared::types::{CategoryId, ExpenseId, MonthYear, UserId};

use crate::entities::{categories, expenses};

/// Error types for expense operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    /// Expense not found.
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),

    /// The referenced category does not exist.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Input rejected by expense rules.
    #[error(transparent)]
    Invalid(#[from] ExpenseRuleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository for expense operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an expense for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input fails validation
    /// - The category does not exist
    /// - Database operation fails
    pub async fn create(&self, user_id: UserId, input: ExpenseInput) -> Result<Expense, ExpenseError> {
        input.validate()?;
        let category = self.require_category(input.category_id).await?;

        let now = Utc::now();
        let model = expenses::ActiveModel {
            user_id: Set(user_id.into_inner()),
            category_id: Set(input.category_id.into_inner()),
            amount: Set(input.amount),
            expense_date: Set(input.expense_date),
            description: Set(input.description),
            payment_method: Set(input.payment_method.into()),
            status: Set(input.status.into()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(to_domain(model, Some(category)))
    }

    /// Gets an expense by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        Ok(expenses::Entity::find_by_id(id.into_inner())
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await?
            .map(|(model, category)| to_domain(model, category)))
    }

    /// Lists a user's expenses, newest date first, optionally for one month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_owner(
        &self,
        user_id: UserId,
        month: Option<MonthYear>,
    ) -> Result<Vec<Expense>, ExpenseError> {
        let mut query = expenses::Entity::find()
            .find_also_related(categories::Entity)
            .filter(expenses::Column::UserId.eq(user_id.into_inner()));

        if let Some(month) = month {
            query = query
                .filter(expenses::Column::ExpenseDate.gte(month.first_day()))
                .filter(expenses::Column::ExpenseDate.lt(month.next_month_first_day()));
        }

        Ok(query
            .order_by_desc(expenses::Column::ExpenseDate)
            .order_by_desc(expenses::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(model, category)| to_domain(model, category))
            .collect())
    }

    /// Replaces an expense's fields. Returns `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the category does not exist, or
    /// the database update fails.
    pub async fn update(
        &self,
        id: ExpenseId,
        input: ExpenseInput,
    ) -> Result<Option<Expense>, ExpenseError> {
        input.validate()?;

        let Some(existing) = expenses::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let category = self.require_category(input.category_id).await?;

        let mut active = existing.into_active_model();
        active.category_id = Set(input.category_id.into_inner());
        active.amount = Set(input.amount);
        active.expense_date = Set(input.expense_date);
        active.description = Set(input.description);
        active.payment_method = Set(input.payment_method.into());
        active.status = Set(input.status.into());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Some(to_domain(model, Some(category))))
    }

    /// Deletes an expense. Budgets are untouched. Returns false if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: ExpenseId) -> Result<bool, ExpenseError> {
        let result = expenses::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn require_category(&self, id: CategoryId) -> Result<categories::Model, ExpenseError> {
        categories::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(ExpenseError::CategoryNotFound(id))
    }
}

fn to_domain(model: expenses::Model, category: Option<categories::Model>) -> Expense {
    Expense {
        id: ExpenseId::new(model.id),
        user_id: UserId::new(model.user_id),
        category_id: CategoryId::new(model.category_id),
        category_name: category.map(|c| c.name),
        amount: model.amount,
        expense_date: model.expense_date,
        description: model.description,
        payment_method: model.payment_method.into(),
        status: model.status.into(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
