//! Shared configuration types for the Slotline server
//!
//! This crate provides the environment-driven configuration used across
//! server modules:
//! - Database connection and pool settings
//! - Session and refresh-token lifecycle settings

pub mod config;

// Re-export commonly used items at crate root
pub use config::{DatabaseConfig, SessionConfig};
