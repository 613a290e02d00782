//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Slotline backend.
//! It provides the concrete MySQL implementation of the session store
//! consumed by the core services, along with connection pool construction
//! and environment-driven bootstrap.
//!
//! The `migrations/` directory holds the DDL for the `refresh_tokens`
//! table, including the uniqueness constraint on `token_hash` that the
//! rotation race handling relies on.

use sl_shared::config::{DatabaseConfig, SessionConfig};
use tracing::info;

// Re-export core error types for convenience
pub use sl_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{connect_pool, MySqlSessionStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfraError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Infrastructure configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct InfraConfig {
    /// Database configuration
    pub database: DatabaseConfig,
    /// Session lifecycle configuration
    pub session: SessionConfig,
}

impl InfraConfig {
    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file first if one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database: DatabaseConfig::from_env(),
            session: SessionConfig::from_env(),
        }
    }
}

/// Builds the session store from configuration
pub async fn initialize(config: &InfraConfig) -> Result<MySqlSessionStore, InfraError> {
    let pool = connect_pool(&config.database).await?;

    info!("infrastructure initialized");
    Ok(MySqlSessionStore::new(pool))
}
