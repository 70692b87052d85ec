//! Helpers shared by the route handler tests.

use axum_test::TestServer;
use rusqlite::Connection;
use time::Duration;

use crate::{
    AppState,
    auth::{Email, FullName, NewUser, PasswordHash, UserID, create_access_token, create_user},
    build_router,
    category::{Category, CategoryName, create_category},
    kind::EntryKind,
};

/// Create app state backed by an initialised in-memory database.
///
/// Passwords are hashed with the lowest bcrypt cost to keep the tests fast.
pub fn get_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    let mut state = AppState::new(connection, "test secret").expect("Could not create app state");
    state.password_hash_cost = 4;

    state
}

/// Create a test server for the full application router.
pub fn get_test_server(state: &AppState) -> TestServer {
    TestServer::try_new(build_router(state.clone())).expect("Could not create test server.")
}

/// Insert a user with `email` and return their ID with an access token for them.
#[track_caller]
pub fn create_test_user(state: &AppState, email: &str) -> (UserID, String) {
    let user = create_user(
        NewUser {
            full_name: FullName::new_unchecked("Test User"),
            email: Email::new_unchecked(email),
            password_hash: PasswordHash::new_unchecked("not a real hash"),
            agreed_terms: true,
        },
        &state.db_connection.lock().unwrap(),
    )
    .expect("Could not create test user");

    let token = create_access_token(user.id, Duration::minutes(5), &state.jwt_keys)
        .expect("Could not create access token");

    (user.id, token)
}

/// Insert a category owned by `user_id`.
#[track_caller]
pub fn create_test_category(
    state: &AppState,
    user_id: UserID,
    name: &str,
    kind: EntryKind,
) -> Category {
    create_category(
        CategoryName::new_unchecked(name),
        kind,
        user_id,
        &state.db_connection.lock().unwrap(),
    )
    .expect("Could not create test category")
}
