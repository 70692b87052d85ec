//! This file defines the route handler for log-in requests, which exchange
//! an email and password for a bearer access token.

use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    auth::{Email, JwtKeys, User, get_user_by_email, token::create_access_token},
    db::lock_connection,
    json::AppJson,
};

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LogInState {
    /// The keys used to sign access tokens.
    pub jwt_keys: JwtKeys,
    /// How long issued access tokens are valid for.
    pub access_token_duration: Duration,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            jwt_keys: state.jwt_keys.clone(),
            access_token_duration: state.access_token_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The credentials entered at log-in.
///
/// The password is stored as a plain string. There is no need for validation here since
/// it will be compared against the password in the database, which has been verified.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    pub email: String,
    pub password: String,
}

/// A bearer access token issued on a successful log-in.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
}

/// Handler for log-in requests via the POST method.
///
/// # Errors
///
/// Returns [Error::InvalidCredentials] if the email is not registered or the
/// password is wrong. The two cases are not distinguished so the response does
/// not reveal which emails are registered.
pub async fn post_log_in(
    State(state): State<LogInState>,
    AppJson(credentials): AppJson<LogInData>,
) -> Result<AppJson<AccessToken>, Error> {
    let email = Email::new(&credentials.email).map_err(|_| Error::InvalidCredentials)?;

    let user: User = match get_user_by_email(&email, &*lock_connection(&state.db_connection)?) {
        Ok(user) => user,
        Err(Error::NotFound) => return Err(Error::InvalidCredentials),
        Err(error) => return Err(error),
    };

    let is_password_valid = user
        .password_hash
        .verify(&credentials.password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !is_password_valid {
        return Err(Error::InvalidCredentials);
    }

    let access_token =
        create_access_token(user.id, state.access_token_duration, &state.jwt_keys)?;

    Ok(AppJson(AccessToken {
        access_token,
        token_type: "bearer".to_owned(),
    }))
}
