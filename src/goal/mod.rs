//! Savings goals.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::{GoalState, create_goal_endpoint};
pub use db::{create_goal, create_goal_table, delete_goal, get_all_goals, get_goal, update_goal};
pub use delete::delete_goal_endpoint;
pub use domain::{Goal, GoalId, GoalName, GoalPatch, NewGoal};
pub use edit::update_goal_endpoint;
pub use list::list_goals_endpoint;
