//! MySQL connection pool construction

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use sl_shared::config::DatabaseConfig;

/// Builds a MySQL connection pool from configuration
///
/// The pool is shared by all request handlers and by the cleanup task;
/// connections are acquired per operation, never parked across sleeps.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .max_lifetime(Duration::from_secs(config.max_lifetime))
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "database pool established"
    );

    Ok(pool)
}
