//! Transaction update endpoint.

use axum::{Extension, extract::State};

use crate::{
    Error,
    auth::UserID,
    category::ensure_transaction_category,
    db::lock_connection,
    json::{AppJson, AppPath},
    patch::apply_nullable,
    transaction::{
        Transaction, TransactionId, TransactionPatch, TransactionState, get_transaction,
        update_transaction, validate_description,
    },
};

/// A route handler for changing some or all fields of a transaction.
///
/// The category check runs against the category and type the transaction
/// will have after the update, so changing either one alone is also checked.
pub async fn update_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    AppPath(transaction_id): AppPath<TransactionId>,
    AppJson(patch): AppJson<TransactionPatch>,
) -> Result<AppJson<Transaction>, Error> {
    if let Some(description) = &patch.description {
        validate_description(description.as_deref())?;
    }

    let mut connection = lock_connection(&state.db_connection)?;
    let sql_transaction = connection.transaction()?;

    let current = get_transaction(transaction_id, user_id, &sql_transaction)?;

    let updated = Transaction {
        id: current.id,
        amount: patch.amount.unwrap_or(current.amount),
        category_id: patch.category_id.unwrap_or(current.category_id),
        kind: patch.kind.unwrap_or(current.kind),
        date: patch.date.unwrap_or(current.date),
        description: apply_nullable(patch.description, current.description),
    };

    ensure_transaction_category(updated.category_id, updated.kind, user_id, &sql_transaction)?;
    update_transaction(&updated, user_id, &sql_transaction)?;

    sql_transaction.commit()?;

    Ok(AppJson(updated))
}

#[cfg(test)]
mod update_transaction_endpoint_tests {
    use serde_json::json;
    use time::macros::date;

    use crate::{
        AppState,
        amount::PositiveAmount,
        auth::UserID,
        endpoints::{self, format_endpoint},
        kind::EntryKind,
        test_utils::{create_test_category, create_test_user, get_test_server, get_test_state},
        transaction::{NewTransaction, Transaction, create_transaction, get_transaction},
    };

    fn create_test_transaction(state: &AppState, user_id: UserID, category_id: i64) -> Transaction {
        create_transaction(
            NewTransaction {
                amount: PositiveAmount::new_unchecked(20.0),
                category_id,
                kind: EntryKind::Expense,
                date: date!(2025 - 02 - 10),
                description: Some("Milk".to_owned()),
            },
            user_id,
            &state.db_connection.lock().unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn sparse_update_keeps_other_fields() {
        let state = get_test_state();
        let (user_id, token) = create_test_user(&state, "jo@example.com");
        let groceries = create_test_category(&state, user_id, "Groceries", EntryKind::Expense);
        let transaction = create_test_transaction(&state, user_id, groceries.id);
        let server = get_test_server(&state);

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .authorization_bearer(&token)
            .json(&json!({"amount": 25.5, "date": null}))
            .await;

        response.assert_status_ok();
        let want = Transaction {
            amount: PositiveAmount::new_unchecked(25.5),
            ..transaction
        };
        assert_eq!(response.json::<Transaction>(), want);
    }

    #[tokio::test]
    async fn null_description_clears_it() {
        let state = get_test_state();
        let (user_id, token) = create_test_user(&state, "jo@example.com");
        let groceries = create_test_category(&state, user_id, "Groceries", EntryKind::Expense);
        let transaction = create_test_transaction(&state, user_id, groceries.id);
        let server = get_test_server(&state);

        server
            .put(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .authorization_bearer(&token)
            .json(&json!({"description": null}))
            .await
            .assert_status_ok();

        let stored =
            get_transaction(transaction.id, user_id, &state.db_connection.lock().unwrap())
                .unwrap();
        assert_eq!(stored.description, None);
    }

    #[tokio::test]
    async fn moving_to_category_of_other_kind_fails() {
        let state = get_test_state();
        let (user_id, token) = create_test_user(&state, "jo@example.com");
        let groceries = create_test_category(&state, user_id, "Groceries", EntryKind::Expense);
        let salary = create_test_category(&state, user_id, "Salary", EntryKind::Income);
        let transaction = create_test_transaction(&state, user_id, groceries.id);
        let server = get_test_server(&state);

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .authorization_bearer(&token)
            .json(&json!({"category_id": salary.id}))
            .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({"error": "Category type mismatch"}));
        let stored =
            get_transaction(transaction.id, user_id, &state.db_connection.lock().unwrap())
                .unwrap();
        assert_eq!(stored, transaction);
    }

    #[tokio::test]
    async fn changing_kind_and_category_together_succeeds() {
        let state = get_test_state();
        let (user_id, token) = create_test_user(&state, "jo@example.com");
        let groceries = create_test_category(&state, user_id, "Groceries", EntryKind::Expense);
        let salary = create_test_category(&state, user_id, "Salary", EntryKind::Income);
        let transaction = create_test_transaction(&state, user_id, groceries.id);
        let server = get_test_server(&state);

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .authorization_bearer(&token)
            .json(&json!({"category_id": salary.id, "type": "income"}))
            .await;

        response.assert_status_ok();
        let updated: Transaction = response.json();
        assert_eq!(updated.category_id, salary.id);
        assert_eq!(updated.kind, EntryKind::Income);
    }

    #[tokio::test]
    async fn update_other_users_transaction_is_not_found() {
        let state = get_test_state();
        let (user_id, _) = create_test_user(&state, "jo@example.com");
        let (_, other_token) = create_test_user(&state, "sam@example.com");
        let groceries = create_test_category(&state, user_id, "Groceries", EntryKind::Expense);
        let transaction = create_test_transaction(&state, user_id, groceries.id);
        let server = get_test_server(&state);

        server
            .put(&format_endpoint(endpoints::TRANSACTION, transaction.id))
            .authorization_bearer(&other_token)
            .json(&json!({"amount": 1}))
            .await
            .assert_status_not_found();
    }
}
