//! Business services containing domain logic and use cases.

pub mod session;

// Re-export commonly used types
pub use session::{
    CleanupConfig, IssuedToken, ReusePolicy, SessionCleanup, SessionService, SessionServiceConfig,
};

// Placeholder for future service modules
// pub mod booking_service;
// pub mod staff_service;
