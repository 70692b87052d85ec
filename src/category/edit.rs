//! Category update endpoint.

use axum::{Extension, extract::State};

use crate::{
    Error,
    auth::UserID,
    category::{
        Category, CategoryId, CategoryName, CategoryState, domain::CategoryPatch, get_category,
        is_category_in_use, update_category,
    },
    db::lock_connection,
    json::{AppJson, AppPath},
};

/// A route handler for renaming a category or changing its type.
///
/// # Errors
///
/// The type cannot change while transactions or budgets use the category
/// ([Error::CategoryKindLocked]), since they depend on the type staying the same.
pub async fn update_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user_id): Extension<UserID>,
    AppPath(category_id): AppPath<CategoryId>,
    AppJson(patch): AppJson<CategoryPatch>,
) -> Result<AppJson<Category>, Error> {
    let name = patch.name.as_deref().map(CategoryName::new).transpose()?;

    let mut connection = lock_connection(&state.db_connection)?;
    let transaction = connection.transaction()?;

    let current = get_category(category_id, user_id, &transaction)?;

    let updated = Category {
        id: current.id,
        name: name.unwrap_or(current.name),
        kind: patch.kind.unwrap_or(current.kind),
    };

    if updated.kind != current.kind && is_category_in_use(category_id, &transaction)? {
        return Err(Error::CategoryKindLocked);
    }

    update_category(&updated, user_id, &transaction)?;
    transaction.commit()?;

    Ok(AppJson(updated))
}
