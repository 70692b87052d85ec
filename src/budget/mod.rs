//! Monthly spending limits for expense categories.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;
mod month;

pub use create::{BudgetState, create_budget_endpoint};
pub use db::{
    create_budget, create_budget_table, delete_budget, get_all_budgets, get_budget, update_budget,
};
pub use delete::delete_budget_endpoint;
pub use domain::{Budget, BudgetId, BudgetPatch, NewBudget};
pub use edit::update_budget_endpoint;
pub use list::list_budgets_endpoint;
pub use month::BudgetMonth;
