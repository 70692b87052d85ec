//! Budget creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::UserID,
    budget::{Budget, NewBudget, create_budget},
    category::ensure_budget_category,
    db::lock_connection,
    json::AppJson,
};

/// The state needed for the budget endpoints.
#[derive(Debug, Clone)]
pub struct BudgetState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for setting a budget for an expense category.
pub async fn create_budget_endpoint(
    State(state): State<BudgetState>,
    Extension(user_id): Extension<UserID>,
    AppJson(new_budget): AppJson<NewBudget>,
) -> Result<(StatusCode, AppJson<Budget>), Error> {
    let mut connection = lock_connection(&state.db_connection)?;
    let sql_transaction = connection.transaction()?;

    ensure_budget_category(new_budget.category_id, user_id, &sql_transaction)?;
    let budget = create_budget(new_budget, user_id, &sql_transaction)?;

    sql_transaction.commit()?;

    Ok((StatusCode::CREATED, AppJson(budget)))
}
