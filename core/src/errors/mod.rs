//! Domain-specific error types and error handling.

mod types;

pub use types::{SessionError, StoreError};

/// Convenience alias for session service results
pub type SessionResult<T> = Result<T, SessionError>;
