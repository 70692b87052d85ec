//! Transaction listing endpoint with optional filters.

use axum::{Extension, extract::State};

use crate::{
    Error,
    auth::UserID,
    db::lock_connection,
    json::{AppJson, AppQuery},
    transaction::{Transaction, TransactionFilter, TransactionState, query_transactions},
};

/// A route handler for listing the user's transactions, newest first.
///
/// Supports the query parameters `start_date`, `end_date`, `category_id` and `type`.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    AppQuery(filter): AppQuery<TransactionFilter>,
) -> Result<AppJson<Vec<Transaction>>, Error> {
    let transactions =
        query_transactions(user_id, &filter, &*lock_connection(&state.db_connection)?)?;

    Ok(AppJson(transactions))
}
