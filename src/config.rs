//! Server settings read from the command line or the environment.

use std::{net::IpAddr, path::PathBuf};

use clap::Parser;

/// The REST API server for the finance tracker.
///
/// Every option can also be set with the environment variable shown in the
/// help text, or in a `.env` file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File path to the application SQLite database.
    #[arg(long, env = "DATABASE_PATH")]
    pub db_path: PathBuf,

    /// The secret used to sign access tokens.
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// The address to serve the API from.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory containing an SSL certificate `cert.pem` and key `key.pem`.
    ///
    /// The server uses plain HTTP when this is not set.
    #[arg(long, env = "CERT_PATH")]
    pub cert_path: Option<PathBuf>,

    /// How long an access token stays valid after logging in.
    #[arg(long, env = "ACCESS_TOKEN_EXPIRE_MINUTES", default_value_t = 60)]
    pub access_token_expire_minutes: i64,

    /// Comma separated origins allowed to make cross-origin requests, or "*" for any origin.
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub cors_origins: Vec<String>,

    /// Include password reset tokens in forgot-password responses.
    ///
    /// Only for development, since it lets anyone reset any password. Only
    /// registered emails get a token, so it also reveals which emails have
    /// an account.
    #[arg(long, env = "EXPOSE_RESET_TOKENS")]
    pub expose_reset_tokens: bool,

    /// File to append debug logs to.
    #[arg(long, env = "LOG_PATH", default_value = "debug.log")]
    pub log_path: PathBuf,
}

impl Config {
    /// The CORS origins with surrounding whitespace and empty entries removed.
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
