//! Category listing endpoint.

use axum::{Extension, extract::State};

use crate::{
    Error,
    auth::UserID,
    category::{Category, CategoryState, get_all_categories},
    db::lock_connection,
    json::AppJson,
};

/// A route handler for listing the user's categories, oldest first.
pub async fn list_categories_endpoint(
    State(state): State<CategoryState>,
    Extension(user_id): Extension<UserID>,
) -> Result<AppJson<Vec<Category>>, Error> {
    let categories = get_all_categories(user_id, &*lock_connection(&state.db_connection)?)?;

    Ok(AppJson(categories))
}
