mod log_in;
mod middleware;
mod password;
mod password_reset;
mod profile;
mod register_user;
mod token;
mod user;

pub use log_in::post_log_in;
pub use middleware::{AuthState, auth_guard};
pub use password::{PasswordHash, ValidatedPassword};
pub use password_reset::{forgot_password, post_reset_password};
pub use profile::get_current_user;
pub use register_user::register_user;
pub use token::{DEFAULT_ACCESS_TOKEN_DURATION, JwtKeys};
pub use user::{
    Email, FullName, NewUser, User, UserID, UserResponse, create_user, create_user_table,
    email_exists, get_user_by_email, get_user_by_id,
};

#[cfg(test)]
pub use token::create_access_token;
