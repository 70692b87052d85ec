//! Signing and verifying the JSON Web Tokens used as bearer access tokens.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, auth::UserID};

/// How long an access token is valid for when no other duration is configured.
pub const DEFAULT_ACCESS_TOKEN_DURATION: Duration = Duration::minutes(60);

/// The contents of an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the user the token was issued to, as a decimal string.
    pub sub: String,
    /// The time the token was issued, in seconds since the Unix epoch.
    pub iat: usize,
    /// The expiry time of the token, in seconds since the Unix epoch.
    pub exp: usize,
}

/// The keys for signing and verifying access tokens, derived from a shared secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    /// Create the signing and verification keys from `secret`.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys").finish_non_exhaustive()
    }
}

/// Create a signed access token for `user_id` that expires after `duration`.
///
/// # Errors
///
/// Returns [Error::TokenCreation] if the token could not be signed.
pub fn create_access_token(
    user_id: UserID,
    duration: Duration,
    keys: &JwtKeys,
) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.unix_timestamp() as usize,
        exp: (now + duration).unix_timestamp() as usize,
    };

    encode(&Header::default(), &claims, &keys.encoding)
        .map_err(|error| Error::TokenCreation(error.to_string()))
}

/// Verify `token` and return the ID of the user it was issued to.
///
/// # Errors
///
/// Returns [Error::Unauthenticated] if the token is malformed, has a bad
/// signature, has expired or does not name a user ID.
pub fn decode_access_token(token: &str, keys: &JwtKeys) -> Result<UserID, Error> {
    let token_data = decode::<Claims>(token, &keys.decoding, &Validation::default())
        .map_err(|error| {
            tracing::debug!("rejected access token: {error}");
            Error::Unauthenticated
        })?;

    token_data
        .claims
        .sub
        .parse::<i64>()
        .map(UserID::new)
        .map_err(|_| Error::Unauthenticated)
}
