//! Database operations for savings goals.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    amount::{NonNegativeAmount, PositiveAmount},
    auth::UserID,
    goal::{Goal, GoalId, GoalName, NewGoal},
};

/// Create the goal table.
///
/// # Errors
/// Returns an error if the table could not be created.
pub fn create_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS goal (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES user(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            target_amount REAL NOT NULL CHECK (target_amount > 0),
            current_amount REAL NOT NULL DEFAULT 0 CHECK (current_amount >= 0),
            deadline TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_goal_user ON goal(user_id);",
    )?;

    Ok(())
}

/// Create a new goal owned by `user_id`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn create_goal(
    new_goal: NewGoal,
    user_id: UserID,
    connection: &Connection,
) -> Result<Goal, Error> {
    connection.execute(
        "INSERT INTO goal (user_id, name, target_amount, current_amount, deadline)
            VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            user_id.as_i64(),
            new_goal.name.as_ref(),
            new_goal.target_amount.as_f64(),
            new_goal.current_amount.as_f64(),
            new_goal.deadline,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Goal {
        id,
        name: new_goal.name,
        target_amount: new_goal.target_amount,
        current_amount: new_goal.current_amount,
        deadline: new_goal.deadline,
    })
}

/// Retrieve a goal owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::GoalNotFound] if `id` does not refer to one of the user's goals,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_goal(id: GoalId, user_id: UserID, connection: &Connection) -> Result<Goal, Error> {
    connection
        .prepare(
            "SELECT id, name, target_amount, current_amount, deadline FROM goal
                WHERE id = :id AND user_id = :user_id",
        )?
        .query_row(&[(":id", &id), (":user_id", &user_id.as_i64())], map_goal_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::GoalNotFound,
            error => error.into(),
        })
}

/// Retrieve all of a user's goals, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is a SQL error.
pub fn get_all_goals(user_id: UserID, connection: &Connection) -> Result<Vec<Goal>, Error> {
    connection
        .prepare(
            "SELECT id, name, target_amount, current_amount, deadline FROM goal
                WHERE user_id = :user_id
                ORDER BY id DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_goal_row)?
        .map(|goal_result| goal_result.map_err(Error::SqlError))
        .collect()
}

/// Overwrite a goal owned by `user_id` with `goal`.
///
/// # Errors
/// Returns [Error::GoalNotFound] if the goal does not belong to the user.
pub fn update_goal(goal: &Goal, user_id: UserID, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE goal
            SET name = ?1, target_amount = ?2, current_amount = ?3, deadline = ?4
            WHERE id = ?5 AND user_id = ?6",
        (
            goal.name.as_ref(),
            goal.target_amount.as_f64(),
            goal.current_amount.as_f64(),
            goal.deadline,
            goal.id,
            user_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::GoalNotFound);
    }

    Ok(())
}

/// Delete a goal owned by `user_id`.
///
/// # Errors
/// Returns [Error::GoalNotFound] if the goal does not belong to the user.
pub fn delete_goal(id: GoalId, user_id: UserID, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM goal WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::GoalNotFound);
    }

    Ok(())
}

fn map_goal_row(row: &Row) -> Result<Goal, rusqlite::Error> {
    let id = row.get(0)?;
    let name: String = row.get(1)?;
    let target_amount = PositiveAmount::new_unchecked(row.get(2)?);
    let current_amount = NonNegativeAmount::new_unchecked(row.get(3)?);
    let deadline = row.get(4)?;

    Ok(Goal {
        id,
        name: GoalName::new_unchecked(&name),
        target_amount,
        current_amount,
        deadline,
    })
}
