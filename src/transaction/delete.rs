//! Transaction deletion endpoint.

use axum::{Extension, extract::State, http::StatusCode};

use crate::{
    Error,
    auth::UserID,
    db::lock_connection,
    json::AppPath,
    transaction::{TransactionId, TransactionState, delete_transaction},
};

/// A route handler for deleting a transaction.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    AppPath(transaction_id): AppPath<TransactionId>,
) -> Result<StatusCode, Error> {
    delete_transaction(
        transaction_id,
        user_id,
        &*lock_connection(&state.db_connection)?,
    )?;

    Ok(StatusCode::NO_CONTENT)
}
