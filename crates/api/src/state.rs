use std::sync::Arc;

use tessella_storage::ObjectStore;

use crate::config::ServerConfig;
use crate::mailer::OrderMailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tessella_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Object storage backend for order file uploads.
    pub store: Arc<dyn ObjectStore>,
    /// Shared HTTP client for the assist and checkout forwarders.
    pub http: reqwest::Client,
    /// Order confirmation mailer; `None` when SMTP is not configured.
    pub mailer: Option<Arc<OrderMailer>>,
}
