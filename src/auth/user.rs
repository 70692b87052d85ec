//! Code for creating the user table and fetching users from the database.

use std::fmt::Display;

use email_address::EmailAddress;
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, auth::PasswordHash};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A syntactically valid email address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create an email address.
    ///
    /// The domain is lowercased since it is case-insensitive, the local part
    /// is kept as entered.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if `email` is not a valid email address.
    pub fn new(email: &str) -> Result<Self, Error> {
        let email = email.trim();

        if !EmailAddress::is_valid(email) {
            return Err(Error::Validation(format!(
                "\"{email}\" is not a valid email address"
            )));
        }

        match email.rsplit_once('@') {
            Some((local_part, domain)) => Ok(Self(format!(
                "{local_part}@{}",
                domain.to_lowercase()
            ))),
            None => Err(Error::Validation(format!(
                "\"{email}\" is not a valid email address"
            ))),
        }
    }

    /// Create an email without validation.
    ///
    /// The caller should ensure that `email` is a valid email address.
    pub fn new_unchecked(email: &str) -> Self {
        Self(email.to_owned())
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::new(&value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person's full name, between 2 and 120 characters long.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 120;

    /// Create a full name.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if the trimmed name is shorter than 2 or
    /// longer than 120 characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();
        let length = name.chars().count();

        if (Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            Ok(Self(name.to_owned()))
        } else {
            Err(Error::Validation(format!(
                "full name must be between {} and {} characters",
                Self::MIN_LENGTH,
                Self::MAX_LENGTH
            )))
        }
    }

    /// Create a full name without validation.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FullName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FullName::new(&value)
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The user's full name.
    pub full_name: FullName,
    /// The email the user logs in with.
    pub email: Email,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// Whether the user agreed to the terms and conditions at registration.
    pub agreed_terms: bool,
}

/// The details needed to insert a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: FullName,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub agreed_terms: bool,
}

/// The public view of a user, which never includes the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserID,
    pub full_name: FullName,
    pub email: Email,
    pub agreed_terms: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            agreed_terms: user.agreed_terms,
        }
    }
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                full_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                agreed_terms INTEGER NOT NULL,
                reset_token TEXT UNIQUE,
                reset_token_expires_at TEXT
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns [Error::DuplicateEmail] if the email is already registered, or
/// [Error::SqlError] if some other SQL related error occurred.
pub fn create_user(new_user: NewUser, connection: &Connection) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (full_name, email, password, agreed_terms) VALUES (?1, ?2, ?3, ?4)",
        (
            new_user.full_name.as_ref(),
            new_user.email.as_ref(),
            new_user.password_hash.as_ref(),
            new_user.agreed_terms,
        ),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        full_name: new_user.full_name,
        email: new_user.email,
        password_hash: new_user.password_hash,
        agreed_terms: new_user.agreed_terms,
    })
}

const SELECT_USER: &str = "SELECT id, full_name, email, password, agreed_terms FROM user";

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user ([Error::NotFound]).
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(&format!("{SELECT_USER} WHERE id = :id"))?
        .query_row(&[(":id", &user_id.as_i64())], map_row)
        .map_err(|error| error.into())
}

/// Get the user registered with `email`.
///
/// # Errors
///
/// Returns [Error::NotFound] if no user has registered with `email`.
pub fn get_user_by_email(email: &Email, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(&format!("{SELECT_USER} WHERE email = :email"))?
        .query_row(&[(":email", email.as_ref())], map_row)
        .map_err(|error| error.into())
}

/// Check whether `email` belongs to a registered user.
pub fn email_exists(email: &Email, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM user WHERE email = ?1)",
            [email.as_ref()],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let id = UserID::new(row.get(0)?);
    let full_name: String = row.get(1)?;
    let email: String = row.get(2)?;
    let password_hash: String = row.get(3)?;
    let agreed_terms = row.get(4)?;

    Ok(User {
        id,
        full_name: FullName::new_unchecked(&full_name),
        email: Email::new_unchecked(&email),
        password_hash: PasswordHash::new_unchecked(&password_hash),
        agreed_terms,
    })
}
