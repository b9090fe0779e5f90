//! Rateboard server - role-based store-rating platform.
//!
//! # Architecture
//!
//! - Axum web framework with a bearer-credential extractor
//! - `SQLite` via sqlx; the schema's unique indexes carry the core
//!   invariants (one rating per user per store, one lifetime owner
//!   request per user)
//! - Stateless HS256 credentials; no sessions, no revocation list

#![cfg_attr(not(test), forbid(unsafe_code))]

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rateboard_server::config::ServerConfig;
use rateboard_server::state::AppState;
use rateboard_server::{db, routes};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rateboard_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // Run embedded migrations (the unique indexes below are load-bearing)
    db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Migrations applied");

    let addr = config.socket_addr();
    let state = AppState::new(&config, pool);
    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Rateboard server listening");

    axum::serve(listener, app)
        .await
        .expect("Server terminated");
}
