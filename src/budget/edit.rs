//! Budget update endpoint.

use axum::{Extension, extract::State};

use crate::{
    Error,
    auth::UserID,
    budget::{Budget, BudgetId, BudgetPatch, BudgetState, get_budget, update_budget},
    category::ensure_budget_category,
    db::lock_connection,
    json::{AppJson, AppPath},
};

/// A route handler for changing some or all fields of a budget.
///
/// The category the budget ends up with is checked again, whether or not it
/// was part of the request.
pub async fn update_budget_endpoint(
    State(state): State<BudgetState>,
    Extension(user_id): Extension<UserID>,
    AppPath(budget_id): AppPath<BudgetId>,
    AppJson(patch): AppJson<BudgetPatch>,
) -> Result<AppJson<Budget>, Error> {
    let mut connection = lock_connection(&state.db_connection)?;
    let sql_transaction = connection.transaction()?;

    let current = get_budget(budget_id, user_id, &sql_transaction)?;

    let updated = Budget {
        id: current.id,
        category_id: patch.category_id.unwrap_or(current.category_id),
        amount: patch.amount.unwrap_or(current.amount),
        month: patch.month.unwrap_or(current.month),
    };

    ensure_budget_category(updated.category_id, user_id, &sql_transaction)?;
    update_budget(&updated, user_id, &sql_transaction)?;

    sql_transaction.commit()?;

    Ok(AppJson(updated))
}
