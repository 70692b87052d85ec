//! This file defines the route handler for registering a new user.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::{
        Email, FullName, NewUser, PasswordHash, UserResponse, ValidatedPassword, create_user,
        email_exists,
    },
    db::lock_connection,
    json::AppJson,
};

/// The state needed for registering a user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The bcrypt cost for hashing the new user's password.
    pub password_hash_cost: u32,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            password_hash_cost: state.password_hash_cost,
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The details entered by someone signing up.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    /// Missing is treated the same as `false`.
    #[serde(default)]
    pub agreed_terms: bool,
}

/// A route handler for creating a new user.
///
/// The email is checked for duplicates before the terms agreement, so a
/// taken email is reported even when the terms were not agreed to.
///
/// # Errors
///
/// Returns an error if a field is invalid, the email is already registered,
/// the terms were not agreed to or the password could not be hashed.
pub async fn register_user(
    State(state): State<RegistrationState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, AppJson<UserResponse>), Error> {
    let full_name = FullName::new(&request.full_name)?;
    let email = Email::new(&request.email)?;
    let validated_password = ValidatedPassword::new(&request.password)?;

    if email_exists(&email, &*lock_connection(&state.db_connection)?)? {
        return Err(Error::DuplicateEmail);
    }

    if !request.agreed_terms {
        return Err(Error::TermsNotAccepted);
    }

    // The database lock is not held while hashing.
    let password_hash = PasswordHash::new(validated_password, state.password_hash_cost)
        .inspect_err(|error| {
            tracing::error!("an error occurred while hashing a password: {error}")
        })?;

    let user = create_user(
        NewUser {
            full_name,
            email,
            password_hash,
            agreed_terms: request.agreed_terms,
        },
        &*lock_connection(&state.db_connection)?,
    )?;

    tracing::info!("registered user {}", user.id);

    Ok((StatusCode::CREATED, AppJson(user.into())))
}
