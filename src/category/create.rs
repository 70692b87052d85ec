//! Category creation endpoint.

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
    category::{Category, CategoryName, create_category, domain::CategoryData},
    db::lock_connection,
    json::AppJson,
};

/// The state needed for the category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new category.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user_id): Extension<UserID>,
    AppJson(data): AppJson<CategoryData>,
) -> Result<(StatusCode, AppJson<Category>), Error> {
    let name = CategoryName::new(&data.name)?;

    let category = create_category(
        name,
        data.kind,
        user_id,
        &*lock_connection(&state.db_connection)?,
    )?;

    Ok((StatusCode::CREATED, AppJson(category)))
}
