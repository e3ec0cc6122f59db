//! Persistence layer: sqlx models, repositories, pool construction, and
//! migrations.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Bounded exponential backoff applied to the initial pool connect.
///
/// Only startup is retried. Queries issued after the pool exists are never
/// retried by this crate.
#[derive(Debug, Clone)]
pub struct ConnectRetry {
    /// Attempts after the first failure.
    pub max_retries: u32,
    /// Delay before the first retry; doubles each attempt.
    pub initial_delay: Duration,
    /// Cap on a single delay.
    pub max_delay: Duration,
}

impl Default for ConnectRetry {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl ConnectRetry {
    /// Delay before retry number `attempt` (0-based), capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Create a connection pool, retrying the initial connect with backoff.
pub async fn create_pool_with_retry(
    database_url: &str,
    max_connections: u32,
    retry: &ConnectRetry,
) -> Result<DbPool, sqlx::Error> {
    let mut attempt = 0;
    loop {
        match create_pool(database_url, max_connections).await {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < retry.max_retries => {
                let delay = retry.delay_for_attempt(attempt);
                tracing::warn!(
                    error = %e,
                    attempt = attempt + 1,
                    max_retries = retry.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "Database connect failed, retrying",
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Verify the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_then_caps() {
        let retry = ConnectRetry {
            max_retries: 10,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(1),
        };
        assert_eq!(retry.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(retry.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(retry.delay_for_attempt(3), Duration::from_millis(800));
        assert_eq!(retry.delay_for_attempt(4), Duration::from_secs(1));
        assert_eq!(retry.delay_for_attempt(40), Duration::from_secs(1));
    }
}
