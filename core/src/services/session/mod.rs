//! Session service module for refresh-token lifecycle management
//!
//! This module handles all refresh-token operations:
//! - Issuance at sign-in (raw token returned once, hash persisted)
//! - Rotation on every refresh, with replay detection
//! - Explicit revocation at sign-out
//! - Background cleanup of revoked and expired records

mod cleanup;
mod config;
mod hasher;
mod service;


pub use cleanup::{CleanupConfig, SessionCleanup};
pub use config::{ReusePolicy, SessionServiceConfig};
pub use hasher::hash_token;
pub use service::SessionService;

pub use crate::domain::entities::session::IssuedToken;
