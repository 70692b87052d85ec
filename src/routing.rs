//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    extract::FromRef,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    AppState, Error,
    auth::{
        AuthState, auth_guard, forgot_password, get_current_user, post_log_in,
        post_reset_password, register_user,
    },
    budget::{
        create_budget_endpoint, delete_budget_endpoint, list_budgets_endpoint,
        update_budget_endpoint,
    },
    category::{
        create_category_endpoint, delete_category_endpoint, list_categories_endpoint,
        update_category_endpoint,
    },
    endpoints,
    goal::{create_goal_endpoint, delete_goal_endpoint, list_goals_endpoint, update_goal_endpoint},
    json::AppJson,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Every route except health, registration, log in and password reset needs
/// a valid bearer token.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(post_log_in))
        .route(endpoints::FORGOT_PASSWORD, post(forgot_password))
        .route(endpoints::RESET_PASSWORD, post(post_reset_password));

    let protected_routes = Router::new()
        .route(endpoints::ME, get(get_current_user))
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            put(update_category_endpoint).delete(delete_category_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::BUDGETS,
            get(list_budgets_endpoint).post(create_budget_endpoint),
        )
        .route(
            endpoints::BUDGET,
            put(update_budget_endpoint).delete(delete_budget_endpoint),
        )
        .route(
            endpoints::GOALS,
            get(list_goals_endpoint).post(create_goal_endpoint),
        )
        .route(
            endpoints::GOAL,
            put(update_goal_endpoint).delete(delete_goal_endpoint),
        )
        .route_layer(middleware::from_fn_with_state(
            AuthState::from_ref(&state),
            auth_guard,
        ));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .method_not_allowed_fallback(get_405_method_not_allowed)
        .with_state(state)
}

/// Build the CORS layer for the allowed `origins`.
///
/// An origin of "*" allows any origin. Origins that are not valid header
/// values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors_layer = if origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(header_value) => Some(header_value),
                Err(error) => {
                    tracing::warn!("Ignoring invalid CORS origin {origin:?}: {error}");
                    None
                }
            })
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    cors_layer.allow_methods(Any).allow_headers(Any)
}

async fn get_health() -> AppJson<Value> {
    AppJson(json!({"status": "ok"}))
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}

async fn get_405_method_not_allowed() -> Error {
    Error::MethodNotAllowed
}

#[cfg(test)]
mod health_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{create_test_user, get_test_server, get_test_state},
    };

    #[tokio::test]
    async fn health_check_needs_no_token() {
        let server = get_test_server(&get_test_state());

        let response = server.get(endpoints::HEALTH).await;

        response.assert_status_ok();
        response.assert_json(&json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server(&get_test_state());

        let response = server.get("/api/nope").await;

        response.assert_status_not_found();
        let body: serde_json::Value = response.json();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn wrong_method_is_json_method_not_allowed() {
        let state = get_test_state();
        let server = get_test_server(&state);
        let (_, token) = create_test_user(&state, "jo@example.com");

        let response = server
            .get(&format_endpoint(endpoints::CATEGORY, 1))
            .authorization_bearer(&token)
            .await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        response.assert_json(&json!({"error": "Method not allowed"}));
    }

    #[tokio::test]
    async fn protected_routes_need_token() {
        let server = get_test_server(&get_test_state());

        for endpoint in [
            endpoints::ME,
            endpoints::CATEGORIES,
            endpoints::TRANSACTIONS,
            endpoints::BUDGETS,
            endpoints::GOALS,
        ] {
            server.get(endpoint).await.assert_status_unauthorized();
        }
    }
}


#[cfg(test)]
mod end_to_end_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{get_test_server, get_test_state},
    };

    #[tokio::test]
    async fn register_log_in_and_record_expense() {
        let server = get_test_server(&get_test_state());

        server
            .post(endpoints::REGISTER)
            .json(&json!({
                "full_name": "Jo Bloggs",
                "email": "jo@example.com",
                "password": "correct horse",
                "agreed_terms": true,
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({"email": "jo@example.com", "password": "correct horse"}))
            .await;
        response.assert_status_ok();
        let token = response.json::<Value>()["access_token"]
            .as_str()
            .unwrap()
            .to_owned();

        let response = server
            .post(endpoints::CATEGORIES)
            .authorization_bearer(&token)
            .json(&json!({"name": "Groceries", "type": "expense"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let category_id = response.json::<Value>()["id"].as_i64().unwrap();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&token)
            .json(&json!({
                "amount": 50,
                "category_id": category_id,
                "type": "expense",
                "date": "2025-03-14",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.assert_json_contains(&json!({
            "amount": 50.0,
            "category_id": category_id,
            "type": "expense",
        }));

        server
            .delete(&format_endpoint(endpoints::CATEGORY, category_id))
            .authorization_bearer(&token)
            .await
            .assert_status_bad_request();

        let response = server.get(endpoints::ME).authorization_bearer(&token).await;
        response.assert_status_ok();
        response.assert_json_contains(&json!({"email": "jo@example.com"}));
    }
}
