//! Income and expense categories for grouping transactions and setting budgets.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;
mod reference;

pub use create::{CategoryState, create_category_endpoint};
pub use db::{
    create_category, create_category_table, delete_category, get_all_categories, get_category,
    is_category_in_use, update_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryId, CategoryName};
pub use edit::update_category_endpoint;
pub use list::list_categories_endpoint;
pub use reference::{ensure_budget_category, ensure_transaction_category};
