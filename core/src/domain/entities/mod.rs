//! Domain entities representing core business objects.

pub mod session;

// Placeholder for future entity modules
// pub mod booking;
// pub mod customer;

// Re-export commonly used types
pub use session::{IssuedToken, RefreshToken, REFRESH_TOKEN_EXPIRY_DAYS};
