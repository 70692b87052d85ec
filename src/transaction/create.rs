//! Transaction creation endpoint.

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
    category::ensure_transaction_category,
    db::lock_connection,
    json::AppJson,
    transaction::{NewTransaction, Transaction, create_transaction, validate_description},
};

/// The state needed for the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for recording a new transaction.
///
/// # Errors
///
/// The category must belong to the user ([Error::InvalidCategory]) and be of
/// the same type as the transaction ([Error::CategoryKindMismatch]).
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    AppJson(new_transaction): AppJson<NewTransaction>,
) -> Result<(StatusCode, AppJson<Transaction>), Error> {
    validate_description(new_transaction.description.as_deref())?;

    let mut connection = lock_connection(&state.db_connection)?;
    let sql_transaction = connection.transaction()?;

    ensure_transaction_category(
        new_transaction.category_id,
        new_transaction.kind,
        user_id,
        &sql_transaction,
    )?;
    let transaction = create_transaction(new_transaction, user_id, &sql_transaction)?;

    sql_transaction.commit()?;

    Ok((StatusCode::CREATED, AppJson(transaction)))
}
