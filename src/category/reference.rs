//! Checks for records that refer to a category.

use rusqlite::Connection;

use crate::{
    Error,
    auth::UserID,
    category::{Category, CategoryId, get_category},
    kind::EntryKind,
};

/// Check that a transaction of `kind` may be filed under `category_id`.
///
/// # Errors
///
/// Returns [Error::InvalidCategory] if the user does not own the category, or
/// [Error::CategoryKindMismatch] if the category is of the other kind.
pub fn ensure_transaction_category(
    category_id: CategoryId,
    kind: EntryKind,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    let category = get_referenced_category(category_id, user_id, connection)?;

    if category.kind != kind {
        return Err(Error::CategoryKindMismatch);
    }

    Ok(category)
}

/// Check that a budget may be set for `category_id`.
///
/// # Errors
///
/// Returns [Error::InvalidCategory] if the user does not own the category, or
/// [Error::BudgetRequiresExpenseCategory] if it is an income category.
pub fn ensure_budget_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    let category = get_referenced_category(category_id, user_id, connection)?;

    if category.kind != EntryKind::Expense {
        return Err(Error::BudgetRequiresExpenseCategory);
    }

    Ok(category)
}

fn get_referenced_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    // A missing category is a problem with the request body, not the URL.
    get_category(category_id, user_id, connection).map_err(|error| match error {
        Error::CategoryNotFound => Error::InvalidCategory,
        error => error,
    })
}
