use isotrack_core::lifecycle::GuardMode;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session lifetime in minutes (default: `480`, one shift).
    pub session_ttl_mins: i64,
    /// Lifecycle guard mode for isolation plans and points.
    pub guard_mode: GuardMode,
    /// Root directory for uploaded files (diagram PDFs, photos, reports).
    pub upload_dir: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SESSION_TTL_MINS`     | `480`                      |
    /// | `ISOLATION_GUARDS`     | `strict`                   |
    /// | `UPLOAD_DIR`           | `storage/uploads`          |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_ttl_mins: i64 = std::env::var("SESSION_TTL_MINS")
            .unwrap_or_else(|_| "480".into())
            .parse()
            .expect("SESSION_TTL_MINS must be a valid i64");

        let guard_mode: GuardMode = std::env::var("ISOLATION_GUARDS")
            .unwrap_or_else(|_| "strict".into())
            .parse()
            .expect("ISOLATION_GUARDS must be 'strict' or 'lenient'");

        let upload_dir =
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "storage/uploads".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_ttl_mins,
            guard_mode,
            upload_dir,
        }
    }
}
