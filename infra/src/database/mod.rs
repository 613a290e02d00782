//! Database module - MySQL implementations using SQLx
//!
//! Provides connection pool management and the session store
//! implementation backing the core repository trait.

pub mod mysql;
pub mod pool;


// Re-export commonly used types
pub use mysql::MySqlSessionStore;
pub use pool::connect_pool;
