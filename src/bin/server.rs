use std::{fs::OpenOptions, net::SocketAddr, path::Path, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::{Handle, tls_rustls::RustlsConfig};
use clap::Parser;
use rusqlite::Connection;
use time::Duration;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use finance_tracker::{
    AppState, Config, build_router, cors_layer, graceful_shutdown, logging_middleware,
};

#[tokio::main]
async fn main() {
    // A missing .env file is fine, the settings may come from the environment.
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    setup_logging(&config.log_path);

    let addr = SocketAddr::from((config.host, config.port));

    let connection = Connection::open(&config.db_path).unwrap_or_else(|error| {
        panic!(
            "Could not open database file at {}: {error}",
            config.db_path.display()
        )
    });

    let mut state =
        AppState::new(connection, &config.secret_key).expect("Could not initialize database");
    state.access_token_duration = Duration::minutes(config.access_token_expire_minutes);
    state.expose_reset_tokens = config.expose_reset_tokens;

    if config.expose_reset_tokens {
        tracing::warn!("Password reset tokens will be included in forgot-password responses");
    }

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors_layer(&config.cors_origins()));
    let router = add_tracing_layer(router);

    match &config.cert_path {
        Some(cert_path) => {
            let tls_config = RustlsConfig::from_pem_file(
                cert_path.join("cert.pem"),
                cert_path.join("key.pem"),
            )
            .await
            .expect("Could not open TLS certificates.");

            tracing::info!("HTTPS server listening on {}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(router.into_make_service())
                .await
                .expect("Server stopped unexpectedly");
        }
        None => {
            tracing::info!("HTTP server listening on {}", addr);
            axum_server::bind(addr)
                .handle(handle)
                .serve(router.into_make_service())
                .await
                .expect("Server stopped unexpectedly");
        }
    }
}

fn setup_logging(log_path: &Path) {
    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are turned into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
