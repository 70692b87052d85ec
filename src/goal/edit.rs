//! Goal update endpoint.

use axum::{Extension, extract::State};

use crate::{
    Error,
    auth::UserID,
    db::lock_connection,
    goal::{Goal, GoalId, GoalPatch, GoalState, get_goal, update_goal},
    json::{AppJson, AppPath},
    patch::apply_nullable,
};

/// A route handler for changing some or all fields of a goal.
pub async fn update_goal_endpoint(
    State(state): State<GoalState>,
    Extension(user_id): Extension<UserID>,
    AppPath(goal_id): AppPath<GoalId>,
    AppJson(patch): AppJson<GoalPatch>,
) -> Result<AppJson<Goal>, Error> {
    let mut connection = lock_connection(&state.db_connection)?;
    let sql_transaction = connection.transaction()?;

    let current = get_goal(goal_id, user_id, &sql_transaction)?;

    let updated = Goal {
        id: current.id,
        name: patch.name.unwrap_or(current.name),
        target_amount: patch.target_amount.unwrap_or(current.target_amount),
        current_amount: patch.current_amount.unwrap_or(current.current_amount),
        deadline: apply_nullable(patch.deadline, current.deadline),
    };

    update_goal(&updated, user_id, &sql_transaction)?;

    sql_transaction.commit()?;

    Ok(AppJson(updated))
}
