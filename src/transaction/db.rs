//! Database operations for transactions.

use rusqlite::{Connection, Row, params_from_iter, types::Value};

use crate::{
    Error,
    amount::PositiveAmount,
    auth::UserID,
    transaction::{NewTransaction, Transaction, TransactionFilter, TransactionId},
};

/// Create the transaction table and indexes.
///
/// # Errors
/// Returns an error if the table could not be created.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES user(id) ON DELETE CASCADE,
            category_id INTEGER NOT NULL REFERENCES category(id) ON DELETE RESTRICT,
            amount REAL NOT NULL CHECK (amount > 0),
            kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
            date TEXT NOT NULL,
            description TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);
        CREATE INDEX IF NOT EXISTS idx_transaction_category ON \"transaction\"(category_id);",
    )?;

    Ok(())
}

/// Create a new transaction owned by `user_id`.
///
/// The caller is responsible for checking the category with
/// [crate::category::ensure_transaction_category] first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection.execute(
        "INSERT INTO \"transaction\" (user_id, category_id, amount, kind, date, description)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        (
            user_id.as_i64(),
            new_transaction.category_id,
            new_transaction.amount.as_f64(),
            new_transaction.kind,
            new_transaction.date,
            &new_transaction.description,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Transaction {
        id,
        amount: new_transaction.amount,
        category_id: new_transaction.category_id,
        kind: new_transaction.kind,
        date: new_transaction.date,
        description: new_transaction.description,
    })
}

const SELECT_TRANSACTION: &str =
    "SELECT id, amount, category_id, kind, date, description FROM \"transaction\"";

/// Retrieve a transaction owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to one of the user's transactions,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!("{SELECT_TRANSACTION} WHERE id = :id AND user_id = :user_id"))?
        .query_row(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound,
            error => error.into(),
        })
}

/// Query a user's transactions, newest first.
///
/// Transactions on the same date are ordered by decreasing ID, so the most
/// recently recorded comes first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is a SQL error.
pub fn query_transactions(
    user_id: UserID,
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut where_clause_parts = vec!["user_id = ?1".to_string()];
    let mut query_parameters = vec![Value::Integer(user_id.as_i64())];

    if let Some(start_date) = filter.start_date {
        query_parameters.push(Value::Text(start_date.to_string()));
        where_clause_parts.push(format!("date >= ?{}", query_parameters.len()));
    }

    if let Some(end_date) = filter.end_date {
        query_parameters.push(Value::Text(end_date.to_string()));
        where_clause_parts.push(format!("date <= ?{}", query_parameters.len()));
    }

    if let Some(category_id) = filter.category_id {
        query_parameters.push(Value::Integer(category_id));
        where_clause_parts.push(format!("category_id = ?{}", query_parameters.len()));
    }

    if let Some(kind) = filter.kind {
        query_parameters.push(Value::Text(kind.as_str().to_owned()));
        where_clause_parts.push(format!("kind = ?{}", query_parameters.len()));
    }

    let query_string = format!(
        "{SELECT_TRANSACTION} WHERE {} ORDER BY date DESC, id DESC",
        where_clause_parts.join(" AND ")
    );
    let params = params_from_iter(query_parameters.iter());

    connection
        .prepare(&query_string)?
        .query_map(params, map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}

/// Overwrite a transaction owned by `user_id` with `transaction`.
///
/// # Errors
/// Returns [Error::TransactionNotFound] if the transaction does not belong to the user.
pub fn update_transaction(
    transaction: &Transaction,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE \"transaction\"
            SET category_id = ?1, amount = ?2, kind = ?3, date = ?4, description = ?5
            WHERE id = ?6 AND user_id = ?7",
        (
            transaction.category_id,
            transaction.amount.as_f64(),
            transaction.kind,
            transaction.date,
            &transaction.description,
            transaction.id,
            user_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::TransactionNotFound);
    }

    Ok(())
}

/// Delete a transaction owned by `user_id`.
///
/// # Errors
/// Returns [Error::TransactionNotFound] if the transaction does not belong to the user.
pub fn delete_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::TransactionNotFound);
    }

    Ok(())
}

/// Map a database row to a [Transaction].
///
/// Expects the columns in the order of `SELECT_TRANSACTION`.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = PositiveAmount::new_unchecked(row.get(1)?);
    let category_id = row.get(2)?;
    let kind = row.get(3)?;
    let date = row.get(4)?;
    let description = row.get(5)?;

    Ok(Transaction {
        id,
        amount,
        category_id,
        kind,
        date,
        description,
    })
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        amount::PositiveAmount,
        auth::UserID,
        category::{CategoryName, create_category},
        db::initialize,
        kind::EntryKind,
        transaction::{
            NewTransaction, TransactionFilter, create_transaction, delete_transaction,
            get_transaction, query_transactions, update_transaction,
        },
    };

    const OWNER: UserID = UserID::new(1);
    const OTHER: UserID = UserID::new(2);

    /// Returns a connection with two users, and the IDs of an expense and an
    /// income category owned by the first user.
    fn get_test_connection() -> (Connection, i64, i64) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
            .execute_batch(
                "INSERT INTO user (id, full_name, email, password, agreed_terms)
                    VALUES (1, 'Jo Bloggs', 'jo@example.com', 'hash', 1);
                INSERT INTO user (id, full_name, email, password, agreed_terms)
                    VALUES (2, 'Sam Smith', 'sam@example.com', 'hash', 1);",
            )
            .unwrap();
        let groceries = create_category(
            CategoryName::new_unchecked("Groceries"),
            EntryKind::Expense,
            OWNER,
            &connection,
        )
        .unwrap();
        let salary = create_category(
            CategoryName::new_unchecked("Salary"),
            EntryKind::Income,
            OWNER,
            &connection,
        )
        .unwrap();

        (connection, groceries.id, salary.id)
    }

    fn expense(category_id: i64, date: time::Date) -> NewTransaction {
        NewTransaction {
            amount: PositiveAmount::new_unchecked(12.3),
            category_id,
            kind: EntryKind::Expense,
            date,
            description: Some("Bread".to_owned()),
        }
    }

    #[test]
    fn create_and_get_transaction() {
        let (connection, groceries, _) = get_test_connection();

        let created =
            create_transaction(expense(groceries, date!(2025 - 01 - 02)), OWNER, &connection)
                .unwrap();

        assert!(created.id > 0);
        assert_eq!(get_transaction(created.id, OWNER, &connection), Ok(created));
    }

    #[test]
    fn get_transaction_of_other_user_is_not_found() {
        let (connection, groceries, _) = get_test_connection();
        let created =
            create_transaction(expense(groceries, date!(2025 - 01 - 02)), OWNER, &connection)
                .unwrap();

        assert_eq!(
            get_transaction(created.id, OTHER, &connection),
            Err(Error::TransactionNotFound)
        );
    }

    #[test]
    fn query_orders_by_date_then_id_descending() {
        let (connection, groceries, _) = get_test_connection();
        let older =
            create_transaction(expense(groceries, date!(2025 - 01 - 01)), OWNER, &connection)
                .unwrap();
        let first_same_day =
            create_transaction(expense(groceries, date!(2025 - 01 - 05)), OWNER, &connection)
                .unwrap();
        let second_same_day =
            create_transaction(expense(groceries, date!(2025 - 01 - 05)), OWNER, &connection)
                .unwrap();

        let transactions =
            query_transactions(OWNER, &TransactionFilter::default(), &connection).unwrap();

        assert_eq!(transactions, vec![second_same_day, first_same_day, older]);
    }

    #[test]
    fn query_applies_all_filters() {
        let (connection, groceries, salary) = get_test_connection();
        create_transaction(expense(groceries, date!(2024 - 12 - 31)), OWNER, &connection)
            .unwrap();
        let in_range =
            create_transaction(expense(groceries, date!(2025 - 01 - 15)), OWNER, &connection)
                .unwrap();
        create_transaction(
            NewTransaction {
                kind: EntryKind::Income,
                ..expense(salary, date!(2025 - 01 - 20))
            },
            OWNER,
            &connection,
        )
        .unwrap();
        create_transaction(expense(groceries, date!(2025 - 02 - 01)), OWNER, &connection)
            .unwrap();

        let filter = TransactionFilter {
            start_date: Some(date!(2025 - 01 - 01)),
            end_date: Some(date!(2025 - 01 - 31)),
            category_id: Some(groceries),
            kind: Some(EntryKind::Expense),
        };
        let transactions = query_transactions(OWNER, &filter, &connection).unwrap();

        assert_eq!(transactions, vec![in_range]);
    }

    #[test]
    fn query_date_range_is_inclusive() {
        let (connection, groceries, _) = get_test_connection();
        let start =
            create_transaction(expense(groceries, date!(2025 - 01 - 01)), OWNER, &connection)
                .unwrap();
        let end =
            create_transaction(expense(groceries, date!(2025 - 01 - 31)), OWNER, &connection)
                .unwrap();

        let filter = TransactionFilter {
            start_date: Some(date!(2025 - 01 - 01)),
            end_date: Some(date!(2025 - 01 - 31)),
            ..Default::default()
        };
        let transactions = query_transactions(OWNER, &filter, &connection).unwrap();

        assert_eq!(transactions, vec![end, start]);
    }

    #[test]
    fn query_excludes_other_users() {
        let (connection, groceries, _) = get_test_connection();
        create_transaction(expense(groceries, date!(2025 - 01 - 01)), OWNER, &connection)
            .unwrap();

        let transactions =
            query_transactions(OTHER, &TransactionFilter::default(), &connection).unwrap();

        assert!(transactions.is_empty());
    }

    #[test]
    fn update_and_delete_are_scoped_to_owner() {
        let (connection, groceries, _) = get_test_connection();
        let mut transaction =
            create_transaction(expense(groceries, date!(2025 - 01 - 01)), OWNER, &connection)
                .unwrap();
        transaction.description = None;

        assert_eq!(
            update_transaction(&transaction, OTHER, &connection),
            Err(Error::TransactionNotFound)
        );
        assert_eq!(update_transaction(&transaction, OWNER, &connection), Ok(()));
        assert_eq!(
            get_transaction(transaction.id, OWNER, &connection)
                .unwrap()
                .description,
            None
        );
        assert_eq!(
            delete_transaction(transaction.id, OTHER, &connection),
            Err(Error::TransactionNotFound)
        );
        assert_eq!(delete_transaction(transaction.id, OWNER, &connection), Ok(()));
    }
}
