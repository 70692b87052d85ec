use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::{UserID, UserResponse, get_user_by_id},
    db::lock_connection,
    json::AppJson,
};

/// The state needed to fetch the current user.
#[derive(Debug, Clone)]
pub struct ProfileState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProfileState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns the logged in user.
pub async fn get_current_user(
    State(state): State<ProfileState>,
    Extension(user_id): Extension<UserID>,
) -> Result<AppJson<UserResponse>, Error> {
    let user = get_user_by_id(user_id, &*lock_connection(&state.db_connection)?)
        .map_err(|error| match error {
            Error::NotFound => Error::Unauthenticated,
            error => error,
        })?;

    Ok(AppJson(user.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State};
    use rusqlite::Connection;

    use crate::{
        Error,
        auth::{Email, FullName, NewUser, PasswordHash, UserID, create_user},
        db::initialize,
    };

    use super::{ProfileState, get_current_user};

    fn get_state() -> (ProfileState, UserID) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user = create_user(
            NewUser {
                full_name: FullName::new_unchecked("Jo Bloggs"),
                email: Email::new_unchecked("jo@example.com"),
                password_hash: PasswordHash::new_unchecked("hash"),
                agreed_terms: true,
            },
            &connection,
        )
        .unwrap();

        (
            ProfileState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            user.id,
        )
    }

    #[tokio::test]
    async fn returns_logged_in_user() {
        let (state, user_id) = get_state();

        let user = get_current_user(State(state), Extension(user_id))
            .await
            .unwrap()
            .0;

        assert_eq!(user.id, user_id);
        assert_eq!(user.email, Email::new_unchecked("jo@example.com"));
    }

    #[tokio::test]
    async fn missing_user_is_unauthenticated() {
        let (state, _) = get_state();

        let result = get_current_user(State(state), Extension(UserID::new(999))).await;

        assert!(matches!(result, Err(Error::Unauthenticated)));
    }
}
