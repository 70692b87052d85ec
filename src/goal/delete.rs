//! Goal deletion endpoint.

use axum::{Extension, extract::State, http::StatusCode};

use crate::{
    Error,
    auth::UserID,
    db::lock_connection,
    goal::{GoalId, GoalState, delete_goal},
    json::AppPath,
};

/// A route handler for deleting a goal.
pub async fn delete_goal_endpoint(
    State(state): State<GoalState>,
    Extension(user_id): Extension<UserID>,
    AppPath(goal_id): AppPath<GoalId>,
) -> Result<StatusCode, Error> {
    delete_goal(goal_id, user_id, &*lock_connection(&state.db_connection)?)?;

    Ok(StatusCode::NO_CONTENT)
}
