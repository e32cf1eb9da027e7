//! Budget store: CRUD over budgets keyed by (owner, category-or-overall, month).
//!
//! The key is unique at the storage layer. `exists_for_key` stays as a fast
//! path for a readable conflict, and a lost race surfaces as the same conflict.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, sea_query::Expr,
};
use spendwatch_core::budget::{
    Budget, BudgetError as BudgetRuleError, BudgetKey, BudgetService, BudgetStatus,
    BudgetVsActual, NewBudget,
};
use spendwatch_core::expense::SpendingQuery;
use spendwatch_shared::types::{BudgetId, CategoryId, MonthYear, MonthYearError, UserId};
use tracing::debug;

use super::spending::SpendingRepository;
use crate::entities::{budgets, categories};

/// Error types for budget operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// Budget not found.
    #[error("Budget not found: {0}")]
    NotFound(BudgetId),

    /// A budget already exists for the same owner, category, and month.
    #[error("A budget already exists for {category} in {month_year}")]
    Conflict {
        /// Category label.
        category: String,
        /// Budget month.
        month_year: MonthYear,
    },

    /// The referenced category does not exist.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Amount rejected by budget rules.
    #[error(transparent)]
    Invalid(#[from] BudgetRuleError),

    /// A stored month key could not be read back.
    #[error("Stored budget has an invalid month: {0}")]
    StoredMonth(#[from] MonthYearError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl BudgetError {
    fn conflict(key: &BudgetKey) -> Self {
        Self::Conflict {
            category: key
                .category_id
                .map_or_else(|| "Overall".to_string(), |id| format!("category {id}")),
            month_year: key.month_year,
        }
    }
}

/// Repository for budget operations.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
    spending: SpendingRepository,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let spending = SpendingRepository::new(db.clone());
        Self { db, spending }
    }

    // ========================================================================
    // Budget CRUD
    // ========================================================================

    /// Creates a budget.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not positive
    /// - The category does not exist
    /// - A budget already exists for the key (also when a concurrent insert wins)
    /// - Database operation fails
    pub async fn create(&self, input: NewBudget) -> Result<Budget, BudgetError> {
        BudgetService::validate_amount(input.amount)?;
        let key = input.key();

        if let Some(category_id) = input.category_id {
            categories::Entity::find_by_id(category_id.into_inner())
                .one(&self.db)
                .await?
                .ok_or(BudgetError::CategoryNotFound(category_id))?;
        }

        if self.exists_for_key(&key).await? {
            return Err(BudgetError::conflict(&key));
        }

        let now = Utc::now();
        let category_id = input.category_id.map(CategoryId::into_inner);
        let budget = budgets::ActiveModel {
            user_id: Set(input.user_id.into_inner()),
            category_id: Set(category_id),
            category_key: Set(budgets::category_key(category_id)),
            amount: Set(input.amount),
            month_year: Set(input.month_year.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = match budget.insert(&self.db).await {
            Ok(model) => model,
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!(month_year = %key.month_year, "Lost budget insert race");
                return Err(BudgetError::conflict(&key));
            }
            Err(err) => return Err(err.into()),
        };

        let id = BudgetId::new(model.id);
        self.get_by_id(id).await?.ok_or(BudgetError::NotFound(id))
    }

    /// Gets a budget by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_by_id(&self, id: BudgetId) -> Result<Option<Budget>, BudgetError> {
        budgets::Entity::find_by_id(id.into_inner())
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await?
            .map(to_domain)
            .transpose()
    }

    /// Finds the budget for a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_key(&self, key: &BudgetKey) -> Result<Option<Budget>, BudgetError> {
        budgets::Entity::find()
            .find_also_related(categories::Entity)
            .filter(key_condition(key))
            .one(&self.db)
            .await?
            .map(to_domain)
            .transpose()
    }

    /// Replaces a budget's amount. Returns false if the budget does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive or the database update fails.
    pub async fn update_amount(&self, id: BudgetId, amount: Decimal) -> Result<bool, BudgetError> {
        BudgetService::validate_amount(amount)?;

        let result = budgets::Entity::update_many()
            .col_expr(budgets::Column::Amount, Expr::value(amount))
            .col_expr(budgets::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(budgets::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes a budget. Expenses are untouched. Returns false if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: BudgetId) -> Result<bool, BudgetError> {
        let result = budgets::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Returns true if a budget exists for the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn exists_for_key(&self, key: &BudgetKey) -> Result<bool, BudgetError> {
        let count = budgets::Entity::find()
            .filter(key_condition(key))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Lists an owner's budgets for one month, overall first then by category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_owner_and_month(
        &self,
        user_id: UserId,
        month_year: MonthYear,
    ) -> Result<Vec<Budget>, BudgetError> {
        budgets::Entity::find()
            .find_also_related(categories::Entity)
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .filter(budgets::Column::MonthYear.eq(month_year.to_string()))
            .order_by_asc(budgets::Column::CategoryKey)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    /// Lists every budget an owner has, newest month first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all_for_owner(&self, user_id: UserId) -> Result<Vec<Budget>, BudgetError> {
        budgets::Entity::find()
            .find_also_related(categories::Entity)
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(budgets::Column::MonthYear)
            .order_by_asc(budgets::Column::CategoryKey)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    // ========================================================================
    // Status views
    // ========================================================================

    /// Evaluates a budget against the spending currently recorded for its key.
    ///
    /// # Errors
    ///
    /// Returns an error if the spending query fails.
    pub async fn evaluate(&self, budget: &Budget) -> Result<BudgetStatus, BudgetError> {
        let spending = self
            .spending
            .current_spending(&SpendingQuery::from(&budget.key()))
            .await?;
        Ok(BudgetService::evaluate(budget, spending))
    }

    /// Status of the budget for a key, or `None` when there is no budget.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn status_for_key(&self, key: &BudgetKey) -> Result<Option<BudgetStatus>, BudgetError> {
        match self.find_by_key(key).await? {
            Some(budget) => Ok(Some(self.evaluate(&budget).await?)),
            None => Ok(None),
        }
    }

    /// Status of each of an owner's budgets for a month.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn statuses_for_month(
        &self,
        user_id: UserId,
        month_year: MonthYear,
    ) -> Result<Vec<BudgetStatus>, BudgetError> {
        let budgets = self.list_for_owner_and_month(user_id, month_year).await?;
        let mut statuses = Vec::with_capacity(budgets.len());
        for budget in &budgets {
            statuses.push(self.evaluate(budget).await?);
        }
        Ok(statuses)
    }

    /// Budget-vs-actual for the budget at `key`, or `None` when there is no
    /// budget. A key without a category names the overall budget only.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn vs_actual(&self, key: &BudgetKey) -> Result<Option<BudgetVsActual>, BudgetError> {
        let Some(budget) = self.find_by_key(key).await? else {
            return Ok(None);
        };
        let actual = self.spending.summary(&SpendingQuery::from(key)).await?;
        Ok(Some(BudgetService::compare_with_actual(&budget, &actual)))
    }
}

fn key_condition(key: &BudgetKey) -> Condition {
    Condition::all()
        .add(budgets::Column::UserId.eq(key.user_id.into_inner()))
        .add(
            budgets::Column::CategoryKey
                .eq(budgets::category_key(key.category_id.map(CategoryId::into_inner))),
        )
        .add(budgets::Column::MonthYear.eq(key.month_year.to_string()))
}

fn to_domain(
    (model, category): (budgets::Model, Option<categories::Model>),
) -> Result<Budget, BudgetError> {
    Ok(Budget {
        id: BudgetId::new(model.id),
        user_id: UserId::new(model.user_id),
        category_id: model.category_id.map(CategoryId::new),
        category_name: category.map(|c| c.name),
        amount: model.amount,
        month_year: MonthYear::parse(model.month_year.trim())?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
