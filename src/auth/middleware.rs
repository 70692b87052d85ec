//! Authentication middleware that validates bearer tokens.

use std::sync::{Arc, Mutex};

use axum::{
    RequestPartsExt,
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::{JwtKeys, UserID, get_user_by_id, token::decode_access_token},
    db::lock_connection,
};

/// The state needed for the auth middleware
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The keys used to verify access tokens.
    pub jwt_keys: JwtKeys,
    /// The database connection for checking the user still exists.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            jwt_keys: state.jwt_keys.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Middleware function that checks for a valid bearer token.
///
/// The user ID is placed into the request and the request executed normally if the token is
/// valid and belongs to an existing user, otherwise a 401 response is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();

    let user_id = match authenticate(&mut parts, &state).await {
        Ok(user_id) => user_id,
        Err(error) => return error.into_response(),
    };

    parts.extensions.insert(user_id);
    let request = Request::from_parts(parts, body);

    next.run(request).await
}

async fn authenticate(
    parts: &mut axum::http::request::Parts,
    state: &AuthState,
) -> Result<UserID, Error> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| Error::Unauthenticated)?;

    let user_id = decode_access_token(bearer.token(), &state.jwt_keys)?;

    let connection = lock_connection(&state.db_connection)?;

    // Tokens outlive deleted users, so the user must be checked on every request.
    match get_user_by_id(user_id, &connection) {
        Ok(_) => Ok(user_id),
        Err(Error::NotFound) => {
            tracing::debug!("access token names unknown user {user_id}");
            Err(Error::Unauthenticated)
        }
        Err(error) => Err(error),
    }
}
