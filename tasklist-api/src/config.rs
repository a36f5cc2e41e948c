/// Configuration management for the API servers
///
/// Both binaries read the same environment variables:
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `DATABASE_CONNECT_TIMEOUT_SECONDS`: pool acquire timeout (default: 30)
/// - `API_HOST`: host to bind to (default: 0.0.0.0)
/// - `API_PORT`: port to bind to (default: 3000)
/// - `CORS_ORIGINS`: comma-separated allowed origins, `*` for any (default: *)
/// - `APP_ENV`: `production` enables HSTS (default: development)
/// - `STATIC_DIR`: directory served for unmatched paths (optional)
/// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
/// - `RUST_LOG`: log filter
///
/// # Example
///
/// ```no_run
/// use tasklist_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` means any)
    pub cors_origins: Vec<String>,

    /// Production mode (enables HSTS)
    pub production: bool,

    /// Static front-end directory
    pub static_dir: Option<PathBuf>,

    /// Emit JSON logs instead of human-readable ones
    pub json_logs: bool,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection
    pub connect_timeout_seconds: u64,
}

impl Config {
    /// Loads configuration from the process environment (and `.env` if present)
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a numeric variable
    /// doesn't parse.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = get("API_HOST", "0.0.0.0");
        let port = get("API_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("API_PORT is not a valid port: {}", e))?;

        let cors_origins = get("CORS_ORIGINS", "*")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let production = get("APP_ENV", "development").eq_ignore_ascii_case("production");
        let static_dir = lookup("STATIC_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        let json_logs = get("LOG_FORMAT", "pretty").eq_ignore_ascii_case("json");

        let url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = get("DATABASE_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS is invalid: {}", e))?;

        let connect_timeout_seconds = get("DATABASE_CONNECT_TIMEOUT_SECONDS", "30")
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("DATABASE_CONNECT_TIMEOUT_SECONDS is invalid: {}", e))?;

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
                static_dir,
                json_logs,
            },
            database: DatabaseConfig {
                url,
                max_connections,
                connect_timeout_seconds,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Pool settings for `tasklist_shared::db::pool::create_pool`
    pub fn pool_config(&self) -> tasklist_shared::db::pool::DatabaseConfig {
        tasklist_shared::db::pool::DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            connect_timeout_seconds: self.database.connect_timeout_seconds,
            ..Default::default()
        }
    }
}
