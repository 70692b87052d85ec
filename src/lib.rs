//! A personal finance tracker.
//!
//! This library provides a JSON REST API for recording income and expenses
//! against user defined categories, setting monthly budgets for expense
//! categories and tracking savings goals. Every resource belongs to exactly
//! one user and is only visible to that user.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod amount;
mod app_state;
mod auth;
mod budget;
mod category;
mod config;
mod dates;
mod db;
mod endpoints;
mod goal;
mod json;
mod kind;
mod logging;
mod patch;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::Config;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::{build_router, cors_layer};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A field in the request was missing, malformed or out of range.
    ///
    /// The string describes the problem and is shown to the client.
    #[error("{0}")]
    Validation(String),

    /// The category ID does not refer to a category owned by the user.
    #[error("Invalid category")]
    InvalidCategory,

    /// The transaction type does not match the type of its category.
    #[error("Category type mismatch")]
    CategoryKindMismatch,

    /// Budgets may only be set for expense categories.
    #[error("Budgets require expense category")]
    BudgetRequiresExpenseCategory,

    /// The category cannot be deleted while transactions or budgets refer to it.
    #[error("Category is in use by transactions or budgets")]
    CategoryInUse,

    /// The type of a category cannot change while transactions or budgets refer to it.
    ///
    /// Changing it would leave the existing transactions with a type that no
    /// longer matches their category, or budgets on an income category.
    #[error("Category type cannot be changed while it is in use by transactions or budgets")]
    CategoryKindLocked,

    /// The email used for registration belongs to an existing user.
    #[error("Email already registered")]
    DuplicateEmail,

    /// The user did not agree to the terms and conditions at registration.
    #[error("You must agree to the terms and conditions")]
    TermsNotAccepted,

    /// The password reset token does not match any pending reset.
    #[error("Invalid reset token")]
    InvalidResetToken,

    /// The password reset token was found but has expired.
    #[error("Reset token expired")]
    ResetTokenExpired,

    /// The email and password combination did not match a registered user.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The request did not carry a valid bearer token for an existing user.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The requested category does not exist or belongs to another user.
    #[error("Category not found")]
    CategoryNotFound,

    /// The requested transaction does not exist or belongs to another user.
    #[error("Transaction not found")]
    TransactionNotFound,

    /// The requested budget does not exist or belongs to another user.
    #[error("Budget not found")]
    BudgetNotFound,

    /// The requested goal does not exist or belongs to another user.
    #[error("Goal not found")]
    GoalNotFound,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("The requested resource could not be found")]
    NotFound,

    /// The path exists but does not accept the request's HTTP method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An access token could not be created.
    #[error("could not create access token: {0}")]
    TokenCreation(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_)
            | Error::InvalidCategory
            | Error::CategoryKindMismatch
            | Error::BudgetRequiresExpenseCategory
            | Error::CategoryInUse
            | Error::CategoryKindLocked
            | Error::DuplicateEmail
            | Error::TermsNotAccepted
            | Error::InvalidResetToken
            | Error::ResetTokenExpired => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials | Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::CategoryNotFound
            | Error::TransactionNotFound
            | Error::BudgetNotFound
            | Error::GoalNotFound
            | Error::NotFound => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::HashingError(_)
            | Error::TokenCreation(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal details are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "Internal server error".to_owned()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
