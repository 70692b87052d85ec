//! Forgotten password recovery with single-use, expiring reset tokens.
//!
//! A forgot-password request stores a fresh random token against the user,
//! replacing any earlier one. Resetting the password with that token swaps in
//! the new password hash and clears the token in one database transaction, so
//! each token works at most once.

use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;
use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{
    AppState, Error,
    auth::{Email, PasswordHash, ValidatedPassword},
    db::lock_connection,
    json::AppJson,
};

/// How long a reset token can be used for after it is issued.
pub const RESET_TOKEN_DURATION: Duration = Duration::minutes(30);

/// The reply to every forgot-password request, whether or not the email is registered.
pub const FORGOT_PASSWORD_MESSAGE: &str = "If the email exists, reset instructions were sent.";

/// The reply to a successful password reset.
pub const RESET_PASSWORD_MESSAGE: &str = "Password has been reset successfully.";

const MIN_RESET_TOKEN_LENGTH: usize = 10;

/// Create a new reset token from 32 random bytes, encoded as URL-safe base64 without padding.
pub fn generate_reset_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();

    URL_SAFE_NO_PAD.encode(bytes)
}

/// Store `token` as the pending reset token for the user registered with `email`.
///
/// Any token already pending for the user is replaced.
///
/// Returns whether a user is registered with `email`.
pub fn store_reset_token(
    email: &Email,
    token: &str,
    expires_at: OffsetDateTime,
    connection: &Connection,
) -> Result<bool, Error> {
    let rows_affected = connection.execute(
        "UPDATE user SET reset_token = ?1, reset_token_expires_at = ?2 WHERE email = ?3",
        (token, expires_at, email.as_ref()),
    )?;

    Ok(rows_affected != 0)
}

/// Replace the password of the user holding the reset `token` and consume the token.
///
/// # Errors
///
/// This function will return an error if:
/// - no user holds `token` ([Error::InvalidResetToken]), which includes tokens that were already used,
/// - the token expired before `now` ([Error::ResetTokenExpired]),
/// - or there was an SQL error.
pub fn reset_password(
    token: &str,
    password_hash: &PasswordHash,
    now: OffsetDateTime,
    connection: &mut Connection,
) -> Result<(), Error> {
    let transaction = connection.transaction()?;

    let (user_id, expires_at): (i64, Option<OffsetDateTime>) = transaction
        .query_row(
            "SELECT id, reset_token_expires_at FROM user WHERE reset_token = ?1",
            [token],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?
        .ok_or(Error::InvalidResetToken)?;

    match expires_at {
        Some(expires_at) if now <= expires_at => {}
        Some(_) => return Err(Error::ResetTokenExpired),
        None => return Err(Error::InvalidResetToken),
    }

    transaction.execute(
        "UPDATE user
            SET password = ?1, reset_token = NULL, reset_token_expires_at = NULL
            WHERE id = ?2",
        (password_hash.as_ref(), user_id),
    )?;

    transaction.commit()?;

    tracing::info!("reset password for user {user_id}");

    Ok(())
}

/// The state needed for the password reset routes.
#[derive(Debug, Clone)]
pub struct PasswordResetState {
    pub password_hash_cost: u32,
    /// Whether to include the reset token in forgot-password responses.
    pub expose_reset_tokens: bool,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for PasswordResetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            password_hash_cost: state.password_hash_cost,
            expose_reset_tokens: state.expose_reset_tokens,
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
}

/// A route handler for requesting a password reset token.
///
/// The message is the same whether or not the email is registered. When
/// reset tokens are exposed, only registered emails get a token.
pub async fn forgot_password(
    State(state): State<PasswordResetState>,
    AppJson(request): AppJson<ForgotPasswordRequest>,
) -> Result<AppJson<ForgotPasswordResponse>, Error> {
    let email = Email::new(&request.email)?;
    let token = generate_reset_token();
    let expires_at = OffsetDateTime::now_utc() + RESET_TOKEN_DURATION;

    let user_exists = store_reset_token(
        &email,
        &token,
        expires_at,
        &*lock_connection(&state.db_connection)?,
    )?;

    if user_exists {
        // No mail delivery exists, the token only leaves the server when exposed below.
        tracing::info!("issued a password reset token");
    } else {
        tracing::debug!("password reset requested for an unregistered email");
    }

    let reset_token = (user_exists && state.expose_reset_tokens).then_some(token);

    Ok(AppJson(ForgotPasswordResponse {
        message: FORGOT_PASSWORD_MESSAGE.to_owned(),
        reset_token,
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetPasswordResponse {
    pub message: String,
}

/// A route handler for setting a new password with a reset token.
///
/// # Errors
///
/// Returns an error if the token is too short, unknown, already used or
/// expired, or if the new password is too short.
pub async fn post_reset_password(
    State(state): State<PasswordResetState>,
    AppJson(request): AppJson<ResetPasswordRequest>,
) -> Result<AppJson<ResetPasswordResponse>, Error> {
    if request.token.chars().count() < MIN_RESET_TOKEN_LENGTH {
        return Err(Error::Validation(format!(
            "token must be at least {MIN_RESET_TOKEN_LENGTH} characters long"
        )));
    }

    let validated_password = ValidatedPassword::new(&request.new_password)?;
    let password_hash = PasswordHash::new(validated_password, state.password_hash_cost)?;

    reset_password(
        &request.token,
        &password_hash,
        OffsetDateTime::now_utc(),
        &mut *lock_connection(&state.db_connection)?,
    )?;

    Ok(AppJson(ResetPasswordResponse {
        message: RESET_PASSWORD_MESSAGE.to_owned(),
    }))
}
