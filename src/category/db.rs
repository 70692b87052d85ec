//! Database operations for categories.
//!
//! Every query is scoped to the owning user, so a category that belongs to
//! someone else looks the same as one that does not exist.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    auth::UserID,
    category::{Category, CategoryId, CategoryName},
    kind::EntryKind,
};

/// Create a category for `user_id` and return it with its generated ID.
pub fn create_category(
    name: CategoryName,
    kind: EntryKind,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (user_id, name, kind) VALUES (?1, ?2, ?3);",
        (user_id.as_i64(), name.as_ref(), kind),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category { id, name, kind })
}

/// Retrieve a single category owned by `user_id`.
///
/// # Errors
///
/// Returns [Error::CategoryNotFound] if the category does not exist or belongs to another user.
pub fn get_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, kind FROM category WHERE id = :id AND user_id = :user_id;")?
        .query_row(
            &[(":id", &category_id), (":user_id", &user_id.as_i64())],
            map_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::CategoryNotFound,
            error => error.into(),
        })
}

/// Retrieve all of a user's categories in the order they were created.
pub fn get_all_categories(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, kind FROM category WHERE user_id = ?1 ORDER BY id ASC;")?
        .query_map([user_id.as_i64()], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the name and type of a category owned by `user_id`.
///
/// # Errors
///
/// Returns [Error::CategoryNotFound] if the category does not exist or belongs to another user.
pub fn update_category(
    category: &Category,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1, kind = ?2 WHERE id = ?3 AND user_id = ?4",
        (
            category.name.as_ref(),
            category.kind,
            category.id,
            user_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::CategoryNotFound);
    }

    Ok(())
}

/// Delete a category owned by `user_id`.
///
/// # Errors
///
/// Returns [Error::CategoryNotFound] if the category does not exist or belongs to another user.
pub fn delete_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
        (category_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::CategoryNotFound);
    }

    Ok(())
}

/// Whether any transaction or budget refers to the category.
pub fn is_category_in_use(category_id: CategoryId, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM \"transaction\" WHERE category_id = ?1)
                OR EXISTS(SELECT 1 FROM budget WHERE category_id = ?1)",
            [category_id],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES user(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('income', 'expense'))
        );

        CREATE INDEX IF NOT EXISTS idx_category_user_id ON category(user_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);
    let kind = row.get(2)?;

    Ok(Category { id, name, kind })
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        auth::UserID,
        category::{
            CategoryName, create_category, delete_category, get_all_categories, get_category,
            is_category_in_use, update_category,
        },
        db::initialize,
        kind::EntryKind,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
            .execute_batch(
                "INSERT INTO user (id, full_name, email, password, agreed_terms)
                    VALUES (1, 'Jo Bloggs', 'jo@example.com', 'hash', 1);
                INSERT INTO user (id, full_name, email, password, agreed_terms)
                    VALUES (2, 'Sam Smith', 'sam@example.com', 'hash', 1);",
            )
            .expect("Could not create test users");
        connection
    }

    const OWNER: UserID = UserID::new(1);
    const OTHER: UserID = UserID::new(2);

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();
        let name = CategoryName::new("Groceries").unwrap();

        let category = create_category(name.clone(), EntryKind::Expense, OWNER, &connection)
            .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.name, name);
        assert_eq!(category.kind, EntryKind::Expense);
    }

    #[test]
    fn get_category_succeeds_for_owner() {
        let connection = get_test_db_connection();
        let inserted = create_category(
            CategoryName::new_unchecked("Salary"),
            EntryKind::Income,
            OWNER,
            &connection,
        )
        .unwrap();

        let selected = get_category(inserted.id, OWNER, &connection);

        assert_eq!(selected, Ok(inserted));
    }

    #[test]
    fn get_category_of_other_user_is_not_found() {
        let connection = get_test_db_connection();
        let inserted = create_category(
            CategoryName::new_unchecked("Salary"),
            EntryKind::Income,
            OWNER,
            &connection,
        )
        .unwrap();

        let selected = get_category(inserted.id, OTHER, &connection);

        assert_eq!(selected, Err(Error::CategoryNotFound));
    }

    #[test]
    fn get_all_categories_only_returns_own_in_id_order() {
        let connection = get_test_db_connection();
        let first = create_category(
            CategoryName::new_unchecked("Rent"),
            EntryKind::Expense,
            OWNER,
            &connection,
        )
        .unwrap();
        create_category(
            CategoryName::new_unchecked("Hidden"),
            EntryKind::Expense,
            OTHER,
            &connection,
        )
        .unwrap();
        let second = create_category(
            CategoryName::new_unchecked("Bonus"),
            EntryKind::Income,
            OWNER,
            &connection,
        )
        .unwrap();

        let categories = get_all_categories(OWNER, &connection).unwrap();

        assert_eq!(categories, vec![first, second]);
    }

    #[test]
    fn update_category_of_other_user_is_not_found() {
        let connection = get_test_db_connection();
        let mut category = create_category(
            CategoryName::new_unchecked("Rent"),
            EntryKind::Expense,
            OWNER,
            &connection,
        )
        .unwrap();
        category.name = CategoryName::new_unchecked("Stolen");

        let result = update_category(&category, OTHER, &connection);

        assert_eq!(result, Err(Error::CategoryNotFound));
        assert_eq!(
            get_category(category.id, OWNER, &connection).unwrap().name,
            CategoryName::new_unchecked("Rent")
        );
    }

    #[test]
    fn delete_category_of_other_user_is_not_found() {
        let connection = get_test_db_connection();
        let category = create_category(
            CategoryName::new_unchecked("Rent"),
            EntryKind::Expense,
            OWNER,
            &connection,
        )
        .unwrap();

        assert_eq!(
            delete_category(category.id, OTHER, &connection),
            Err(Error::CategoryNotFound)
        );
        assert_eq!(delete_category(category.id, OWNER, &connection), Ok(()));
    }

    #[test]
    fn category_in_use_by_budget() {
        let connection = get_test_db_connection();
        let category = create_category(
            CategoryName::new_unchecked("Rent"),
            EntryKind::Expense,
            OWNER,
            &connection,
        )
        .unwrap();
        assert_eq!(is_category_in_use(category.id, &connection), Ok(false));

        connection
            .execute(
                "INSERT INTO budget (user_id, category_id, amount, month) VALUES (1, ?1, 10.0, '2025-01')",
                [category.id],
            )
            .unwrap();

        assert_eq!(is_category_in_use(category.id, &connection), Ok(true));
    }

    #[test]
    fn category_in_use_by_transaction() {
        let connection = get_test_db_connection();
        let category = create_category(
            CategoryName::new_unchecked("Rent"),
            EntryKind::Expense,
            OWNER,
            &connection,
        )
        .unwrap();

        connection
            .execute(
                "INSERT INTO \"transaction\" (user_id, category_id, amount, kind, date)
                    VALUES (1, ?1, 10.0, 'expense', '2025-01-01')",
                [category.id],
            )
            .unwrap();

        assert_eq!(is_category_in_use(category.id, &connection), Ok(true));
    }
}
