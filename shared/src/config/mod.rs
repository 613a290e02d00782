//! Configuration module with business-specific sub-modules
//!
//! - `database` - Database connection and pool configuration
//! - `session` - Refresh-token lifecycle and cleanup configuration

pub mod database;
pub mod session;

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use session::SessionConfig;
