//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::Duration;

use crate::{
    Error,
    auth::{DEFAULT_ACCESS_TOKEN_DURATION, JwtKeys, PasswordHash},
    db::initialize,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The keys used to sign and verify access tokens.
    pub jwt_keys: JwtKeys,

    /// How long an access token is valid for after logging in.
    pub access_token_duration: Duration,

    /// The bcrypt cost used when hashing new passwords.
    pub password_hash_cost: u32,

    /// Whether forgot-password responses include the reset token.
    ///
    /// There is no mail delivery, so this is the only way to receive a reset
    /// token and should only be switched on for development.
    pub expose_reset_tokens: bool,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `secret_key` is used to sign access tokens.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, secret_key: &str) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            jwt_keys: JwtKeys::new(secret_key),
            access_token_duration: DEFAULT_ACCESS_TOKEN_DURATION,
            password_hash_cost: PasswordHash::DEFAULT_COST,
            expose_reset_tokens: false,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
