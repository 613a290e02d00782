//! Error types for session and refresh-token management
//!
//! Store-level failures are translated into [`SessionError`] at the service
//! boundary; no raw store error ever crosses the core API. User-facing
//! messages are produced by the presentation layer, which is expected to map
//! `TokenReuseDetected` and `TokenExpired` to a re-authentication outcome and
//! `StoreUnavailable` to a transient-failure outcome.

use thiserror::Error;

/// Errors surfaced by the session services
#[derive(Error, Debug)]
pub enum SessionError {
    /// The persistence layer could not be reached; callers may retry
    #[error("Session store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// No record matches the presented token
    #[error("Invalid refresh token")]
    InvalidToken,

    /// The token's expiry has passed; the client must re-authenticate
    #[error("Refresh token expired")]
    TokenExpired,

    /// A rotated-away or revoked token was presented again
    ///
    /// This is a security event and is surfaced distinctly from ordinary
    /// invalidity so callers can force a full re-authentication and alert.
    #[error("Refresh token reuse detected")]
    TokenReuseDetected,

    /// Unexpected store response shape
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Errors reported by [`SessionStore`](crate::repositories::SessionStore)
/// implementations
///
/// Zero rows affected is never an error; these variants cover genuine
/// infrastructure failures only.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection-level failure (pool exhausted, network down)
    #[error("session store unavailable: {message}")]
    Unavailable { message: String },

    /// Any other store failure (constraint violation, malformed row)
    #[error("session store error: {message}")]
    Internal { message: String },
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable { message } => SessionError::StoreUnavailable { message },
            StoreError::Internal { message } => SessionError::Internal { message },
        }
    }
}
