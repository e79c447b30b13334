use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). All mutation of shared state flows through the repository
/// layer; there is no ambient mutable state outside the database pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sitetrack_db::DbPool,
    /// Server configuration (JWT secrets, CORS, timeouts).
    pub config: Arc<ServerConfig>,
}
