use std::sync::Arc;

use crate::auth::session::SessionStore;
use crate::config::ServerConfig;
use crate::storage::FileStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: isotrack_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// In-memory session store for opaque bearer tokens.
    pub sessions: Arc<SessionStore>,
    /// File storage for diagram PDFs and inspection uploads.
    pub files: Arc<dyn FileStore>,
}
