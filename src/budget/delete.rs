//! Budget deletion endpoint.

use axum::{Extension, extract::State, http::StatusCode};

use crate::{
    Error,
    auth::UserID,
    budget::{BudgetId, BudgetState, delete_budget},
    db::lock_connection,
    json::AppPath,
};

/// A route handler for deleting a budget.
pub async fn delete_budget_endpoint(
    State(state): State<BudgetState>,
    Extension(user_id): Extension<UserID>,
    AppPath(budget_id): AppPath<BudgetId>,
) -> Result<StatusCode, Error> {
    delete_budget(budget_id, user_id, &*lock_connection(&state.db_connection)?)?;

    Ok(StatusCode::NO_CONTENT)
}
