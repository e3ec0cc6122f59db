use std::time::Duration;

use bookmyshoot_db::ConnectRetry;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. Invalid values panic at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background tasks after the listener stops (default: `10`).
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `10`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = env_or("SHUTDOWN_TIMEOUT_SECS", "10")
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_retry: ConnectRetry,
}

impl DatabaseConfig {
    /// | Env Var                     | Default  |
    /// |-----------------------------|----------|
    /// | `DATABASE_URL`              | required |
    /// | `DB_MAX_CONNECTIONS`        | `20`     |
    /// | `DB_CONNECT_RETRIES`        | `5`      |
    /// | `DB_CONNECT_RETRY_DELAY_MS` | `500`    |
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let max_connections: u32 = env_or("DB_MAX_CONNECTIONS", "20")
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let max_retries: u32 = env_or("DB_CONNECT_RETRIES", "5")
            .parse()
            .expect("DB_CONNECT_RETRIES must be a valid u32");

        let delay_ms: u64 = env_or("DB_CONNECT_RETRY_DELAY_MS", "500")
            .parse()
            .expect("DB_CONNECT_RETRY_DELAY_MS must be a valid u64");

        Self {
            url,
            max_connections,
            connect_retry: ConnectRetry {
                max_retries,
                initial_delay: Duration::from_millis(delay_ms),
                ..ConnectRetry::default()
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
