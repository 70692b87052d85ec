//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/goals/{goal_id}', use [format_endpoint].

/// The route for checking the server is up.
pub const HEALTH: &str = "/api/health";
/// The route for registering a new user.
pub const REGISTER: &str = "/api/auth/register";
/// The route for exchanging credentials for an access token.
pub const LOG_IN: &str = "/api/auth/login";
/// The route for requesting a password reset token.
pub const FORGOT_PASSWORD: &str = "/api/auth/forgot-password";
/// The route for setting a new password with a reset token.
pub const RESET_PASSWORD: &str = "/api/auth/reset-password";
/// The route for getting the logged in user.
pub const ME: &str = "/api/auth/me";
/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to update or delete a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list and create budgets.
pub const BUDGETS: &str = "/api/budgets";
/// The route to update or delete a single budget.
pub const BUDGET: &str = "/api/budgets/{budget_id}";
/// The route to list and create goals.
pub const GOALS: &str = "/api/goals";
/// The route to update or delete a single goal.
pub const GOAL: &str = "/api/goals/{goal_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/goals/{goal_id}', '{goal_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        for endpoint in [
            endpoints::HEALTH,
            endpoints::REGISTER,
            endpoints::LOG_IN,
            endpoints::FORGOT_PASSWORD,
            endpoints::RESET_PASSWORD,
            endpoints::ME,
            endpoints::CATEGORIES,
            endpoints::TRANSACTIONS,
            endpoints::BUDGETS,
            endpoints::GOALS,
        ] {
            assert_endpoint_is_valid_uri(endpoint);
        }

        for endpoint in [
            endpoints::CATEGORY,
            endpoints::TRANSACTION,
            endpoints::BUDGET,
            endpoints::GOAL,
        ] {
            assert_endpoint_is_valid_uri(&format_endpoint(endpoint, 1));
        }
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/hello/{world}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
    }
}
