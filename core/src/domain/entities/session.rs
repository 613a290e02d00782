//! Session entities for refresh-token based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Refresh token record stored in the database
///
/// Only the SHA-256 digest of the credential is ever persisted; the raw
/// token string handed to the client is never stored or logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token, never reused
    pub id: Uuid,

    /// User ID this session belongs to
    pub user_id: Uuid,

    /// Hashed token value, unique across all stored records
    pub token_hash: String,

    /// Client-supplied device metadata, informational only
    pub device_info: Option<String>,

    /// Originating address at issuance, informational only
    pub ip_address: Option<String>,

    /// Timestamp when the token was created, immutable
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires, immutable after insert
    pub expires_at: DateTime<Utc>,

    /// Timestamp of the last successful validation
    pub last_used_at: Option<DateTime<Utc>>,

    /// Set once on rotation or sign-out, never cleared
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Creates a new active refresh token record
    ///
    /// # Arguments
    ///
    /// * `user_id` - The session owner's UUID
    /// * `token_hash` - The hashed token value
    /// * `device_info` - Optional client device metadata
    /// * `ip_address` - Optional originating address
    /// * `now` - Current time from the injected clock
    /// * `ttl` - Time until the token expires
    pub fn new(
        user_id: Uuid,
        token_hash: String,
        device_info: Option<String>,
        ip_address: Option<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            device_info,
            ip_address,
            created_at: now,
            expires_at: now + ttl,
            last_used_at: None,
            revoked_at: None,
        }
    }

    /// Checks whether the token has been revoked
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Checks whether the token has expired as of `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Checks whether the token is active (neither revoked nor expired)
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired(now)
    }

    /// Revokes the token at `now`
    ///
    /// Revocation is monotonic: once set, the timestamp is never cleared
    /// or replaced.
    pub fn revoke(&mut self, now: DateTime<Utc>) {
        if self.revoked_at.is_none() {
            self.revoked_at = Some(now);
        }
    }

    /// Records a successful validation at `now`
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_used_at = Some(now);
    }
}

/// Result of issuing or rotating a refresh token
///
/// Carries the raw credential exactly once; after this value is handed to
/// the caller the raw token is not retrievable from anywhere in the system.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The raw secret string for the client
    pub raw_token: String,

    /// The persisted record (hash form only)
    pub record: RefreshToken,
}
