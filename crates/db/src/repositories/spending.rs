//! Aggregation queries over the expense ledger.
//!
//! Every total here is a fresh read: no caching, so two calls against the same
//! ledger state return the same value.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect,
};
use spendwatch_core::expense::{CategorySpending, SpendingQuery, SpendingSummary};
use spendwatch_shared::types::{CategoryId, MonthYear, UserId};

use crate::entities::{categories, expenses};

/// Repository for spending aggregation.
#[derive(Debug, Clone)]
pub struct SpendingRepository {
    db: DatabaseConnection,
}

impl SpendingRepository {
    /// Creates a new spending repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sum of the amounts matched by `query`. Zero when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn current_spending(&self, query: &SpendingQuery) -> Result<Decimal, DbErr> {
        Ok(self.summary(query).await?.total)
    }

    /// Total and count of the expenses matched by `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn summary(&self, query: &SpendingQuery) -> Result<SpendingSummary, DbErr> {
        let row: Option<(Option<Decimal>, i64)> = expenses::Entity::find()
            .select_only()
            .column_as(expenses::Column::Amount.sum(), "total")
            .column_as(expenses::Column::Id.count(), "expense_count")
            .filter(scope(query))
            .into_tuple()
            .one(&self.db)
            .await?;

        let (total, count) = row.unwrap_or((None, 0));
        Ok(SpendingSummary {
            total: round_total(total),
            expense_count: to_count(count),
        })
    }

    /// Per-category spending for one owner and month, largest total first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn by_category(
        &self,
        user_id: UserId,
        month: MonthYear,
    ) -> Result<Vec<CategorySpending>, DbErr> {
        let rows: Vec<(i64, Option<Decimal>, i64)> = expenses::Entity::find()
            .select_only()
            .column(expenses::Column::CategoryId)
            .column_as(expenses::Column::Amount.sum(), "total")
            .column_as(expenses::Column::Id.count(), "expense_count")
            .filter(scope(&SpendingQuery::overall(user_id, month)))
            .group_by(expenses::Column::CategoryId)
            .into_tuple()
            .all(&self.db)
            .await?;

        if rows.is_empty() {
            return Ok(vec![]);
        }

        let names: HashMap<i64, String> = categories::Entity::find()
            .filter(categories::Column::Id.is_in(rows.iter().map(|(id, _, _)| *id)))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut result: Vec<CategorySpending> = rows
            .into_iter()
            .map(|(category_id, total, count)| CategorySpending {
                category_id: CategoryId::new(category_id),
                category_name: names.get(&category_id).cloned().unwrap_or_default(),
                total: round_total(total),
                expense_count: to_count(count),
            })
            .collect();

        result.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category_id.cmp(&b.category_id))
        });
        Ok(result)
    }
}

/// Owner, half-open month range, and optional category.
pub(crate) fn scope(query: &SpendingQuery) -> Condition {
    let mut condition = Condition::all()
        .add(expenses::Column::UserId.eq(query.user_id.into_inner()))
        .add(expenses::Column::ExpenseDate.gte(query.month.first_day()))
        .add(expenses::Column::ExpenseDate.lt(query.month.next_month_first_day()));

    if let Some(category_id) = query.category_id {
        condition = condition.add(expenses::Column::CategoryId.eq(category_id.into_inner()));
    }
    condition
}

fn round_total(total: Option<Decimal>) -> Decimal {
    total.unwrap_or(Decimal::ZERO).round_dp(2)
}

fn to_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
