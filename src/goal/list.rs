//! Goal listing endpoint.

use axum::{Extension, extract::State};

use crate::{
    Error,
    auth::UserID,
    db::lock_connection,
    goal::{Goal, GoalState, get_all_goals},
    json::AppJson,
};

/// A route handler for listing the user's goals, newest first.
pub async fn list_goals_endpoint(
    State(state): State<GoalState>,
    Extension(user_id): Extension<UserID>,
) -> Result<AppJson<Vec<Goal>>, Error> {
    let goals = get_all_goals(user_id, &*lock_connection(&state.db_connection)?)?;

    Ok(AppJson(goals))
}
