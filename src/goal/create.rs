//! Goal creation endpoint.

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
    db::lock_connection,
    goal::{Goal, NewGoal, create_goal},
    json::AppJson,
};

/// The state needed for the goal endpoints.
#[derive(Debug, Clone)]
pub struct GoalState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GoalState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a savings goal.
pub async fn create_goal_endpoint(
    State(state): State<GoalState>,
    Extension(user_id): Extension<UserID>,
    AppJson(new_goal): AppJson<NewGoal>,
) -> Result<(StatusCode, AppJson<Goal>), Error> {
    let goal = create_goal(new_goal, user_id, &*lock_connection(&state.db_connection)?)?;

    Ok((StatusCode::CREATED, AppJson(goal)))
}
