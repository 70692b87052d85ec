//! Category deletion endpoint.

use axum::{Extension, extract::State, http::StatusCode};

use crate::{
    Error,
    auth::UserID,
    category::{CategoryId, CategoryState, delete_category, get_category, is_category_in_use},
    db::lock_connection,
    json::AppPath,
};

/// Handle category deletion.
///
/// # Errors
///
/// Returns [Error::CategoryInUse] while any transaction or budget refers to the category.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user_id): Extension<UserID>,
    AppPath(category_id): AppPath<CategoryId>,
) -> Result<StatusCode, Error> {
    let mut connection = lock_connection(&state.db_connection)?;
    let transaction = connection.transaction()?;

    get_category(category_id, user_id, &transaction)?;

    if is_category_in_use(category_id, &transaction)? {
        return Err(Error::CategoryInUse);
    }

    delete_category(category_id, user_id, &transaction)?;
    transaction.commit()?;

    Ok(StatusCode::NO_CONTENT)
}
