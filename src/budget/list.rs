//! Budget listing endpoint.

use axum::{Extension, extract::State};

use crate::{
    Error,
    auth::UserID,
    budget::{Budget, BudgetState, get_all_budgets},
    db::lock_connection,
    json::AppJson,
};

/// A route handler for listing the user's budgets, latest month first.
pub async fn list_budgets_endpoint(
    State(state): State<BudgetState>,
    Extension(user_id): Extension<UserID>,
) -> Result<AppJson<Vec<Budget>>, Error> {
    let budgets = get_all_budgets(user_id, &*lock_connection(&state.db_connection)?)?;

    Ok(AppJson(budgets))
}
