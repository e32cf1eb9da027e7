//! `SeaORM` entity definitions.

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod notifications;
pub mod sea_orm_active_enums;

pub mod prelude {
    //! Entity re-exports.
    pub use super::budgets::Entity as Budgets;
    pub use super::categories::Entity as Categories;
    pub use super::expenses::Entity as Expenses;
    pub use super::notifications::Entity as Notifications;
}
