//! Database operations for budgets.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    amount::PositiveAmount,
    auth::UserID,
    budget::{Budget, BudgetId, NewBudget},
};

/// Create the budget table.
///
/// # Errors
/// Returns an error if the table could not be created.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS budget (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES user(id) ON DELETE CASCADE,
            category_id INTEGER NOT NULL REFERENCES category(id) ON DELETE RESTRICT,
            amount REAL NOT NULL CHECK (amount > 0),
            month TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_budget_user_month ON budget(user_id, month);
        CREATE INDEX IF NOT EXISTS idx_budget_category ON budget(category_id);",
    )?;

    Ok(())
}

/// Create a new budget owned by `user_id`.
///
/// The caller is responsible for checking the category with
/// [crate::category::ensure_budget_category] first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some other SQL error.
pub fn create_budget(
    new_budget: NewBudget,
    user_id: UserID,
    connection: &Connection,
) -> Result<Budget, Error> {
    connection.execute(
        "INSERT INTO budget (user_id, category_id, amount, month) VALUES (?1, ?2, ?3, ?4)",
        (
            user_id.as_i64(),
            new_budget.category_id,
            new_budget.amount.as_f64(),
            &new_budget.month,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Budget {
        id,
        category_id: new_budget.category_id,
        amount: new_budget.amount,
        month: new_budget.month,
    })
}

/// Retrieve a budget owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::BudgetNotFound] if `id` does not refer to one of the user's budgets,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_budget(id: BudgetId, user_id: UserID, connection: &Connection) -> Result<Budget, Error> {
    connection
        .prepare(
            "SELECT id, category_id, amount, month FROM budget
                WHERE id = :id AND user_id = :user_id",
        )?
        .query_row(&[(":id", &id), (":user_id", &user_id.as_i64())], map_budget_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::BudgetNotFound,
            error => error.into(),
        })
}

/// Retrieve all of a user's budgets, latest month first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is a SQL error.
pub fn get_all_budgets(user_id: UserID, connection: &Connection) -> Result<Vec<Budget>, Error> {
    connection
        .prepare(
            "SELECT id, category_id, amount, month FROM budget
                WHERE user_id = :user_id
                ORDER BY month DESC, id DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_budget_row)?
        .map(|budget_result| budget_result.map_err(Error::SqlError))
        .collect()
}

/// Overwrite a budget owned by `user_id` with `budget`.
///
/// # Errors
/// Returns [Error::BudgetNotFound] if the budget does not belong to the user.
pub fn update_budget(
    budget: &Budget,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE budget SET category_id = ?1, amount = ?2, month = ?3
            WHERE id = ?4 AND user_id = ?5",
        (
            budget.category_id,
            budget.amount.as_f64(),
            &budget.month,
            budget.id,
            user_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::BudgetNotFound);
    }

    Ok(())
}

/// Delete a budget owned by `user_id`.
///
/// # Errors
/// Returns [Error::BudgetNotFound] if the budget does not belong to the user.
pub fn delete_budget(id: BudgetId, user_id: UserID, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM budget WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::BudgetNotFound);
    }

    Ok(())
}

fn map_budget_row(row: &Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        category_id: row.get(1)?,
        amount: PositiveAmount::new_unchecked(row.get(2)?),
        month: row.get(3)?,
    })
}
