//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::TokenService;
use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the database pool
/// and the credential service. Handlers never need the raw config, so
/// only what they use is kept.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: SqlitePool,
    tokens: TokenService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: &ServerConfig, pool: SqlitePool) -> Self {
        let tokens = TokenService::new(&config.token_secret, config.token_ttl);
        Self {
            inner: Arc::new(AppStateInner { pool, tokens }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the credential service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }
}
