//! Initial database migration.
//!
//! Creates categories, budgets, expenses, and notifications with their indexes.
//! Built with the schema DSL so the same migration runs on Postgres and SQLite.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // CATEGORIES
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(id_column(Categories::Id))
                    .col(ColumnDef::new(Categories::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Categories::Description).string_len(255).null())
                    .col(ColumnDef::new(Categories::Icon).string_len(50).null())
                    .col(ColumnDef::new(Categories::ColorCode).string_len(20).null())
                    .col(ColumnDef::new(Categories::UserId).big_integer().null())
                    .col(
                        ColumnDef::new(Categories::IsSystem)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // BUDGETS
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(id_column(Budgets::Id))
                    .col(ColumnDef::new(Budgets::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Budgets::CategoryId).big_integer().null())
                    .col(
                        ColumnDef::new(Budgets::CategoryKey)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(money_column(Budgets::Amount))
                    .col(ColumnDef::new(Budgets::MonthYear).char_len(7).not_null())
                    .col(
                        ColumnDef::new(Budgets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Budgets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_budgets_category")
                            .from(Budgets::Table, Budgets::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One budget per (owner, category-or-overall, month). Closes the
        // check-then-insert race in BudgetRepository::create.
        manager
            .create_index(
                Index::create()
                    .name("uq_budgets_user_category_month")
                    .table(Budgets::Table)
                    .col(Budgets::UserId)
                    .col(Budgets::CategoryKey)
                    .col(Budgets::MonthYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // EXPENSES
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(id_column(Expenses::Id))
                    .col(ColumnDef::new(Expenses::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Expenses::CategoryId).big_integer().not_null())
                    .col(money_column(Expenses::Amount))
                    .col(ColumnDef::new(Expenses::ExpenseDate).date().not_null())
                    .col(ColumnDef::new(Expenses::Description).string_len(500).null())
                    .col(
                        ColumnDef::new(Expenses::PaymentMethod)
                            .string_len(20)
                            .not_null()
                            .default("Cash"),
                    )
                    .col(
                        ColumnDef::new(Expenses::Status)
                            .string_len(20)
                            .not_null()
                            .default("Approved"),
                    )
                    .col(
                        ColumnDef::new(Expenses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_category")
                            .from(Expenses::Table, Expenses::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Aggregation scan: one owner, one month.
        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_user_date")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::ExpenseDate)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // NOTIFICATIONS
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(id_column(Notifications::Id))
                    .col(ColumnDef::new(Notifications::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Notifications::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(
                        ColumnDef::new(Notifications::NotificationType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::ReadAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_read")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .col(Notifications::IsRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budgets::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

fn id_column(name: impl IntoIden) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

// NUMERIC(16,2) on Postgres. SQLite caps decimal precision at 16.
fn money_column(name: impl IntoIden) -> ColumnDef {
    ColumnDef::new(name).decimal_len(16, 2).not_null().to_owned()
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Description,
    Icon,
    ColorCode,
    UserId,
    IsSystem,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Budgets {
    Table,
    Id,
    UserId,
    CategoryId,
    CategoryKey,
    Amount,
    MonthYear,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    UserId,
    CategoryId,
    Amount,
    ExpenseDate,
    Description,
    PaymentMethod,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    UserId,
    Title,
    Message,
    NotificationType,
    IsRead,
    CreatedAt,
    ReadAt,
}
