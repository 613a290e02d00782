//! Session store trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::session::RefreshToken;
use crate::errors::StoreError;

/// Persistence contract for refresh token records
///
/// The store is the sole concurrency arbiter for token rotation: the
/// conditional update in [`revoke_by_hash`](SessionStore::revoke_by_hash)
/// together with the uniqueness constraint on `token_hash` decides which of
/// two concurrent rotations of the same token wins. Implementations must not
/// rely on in-process locking, because multiple process instances may run
/// against the same store.
///
/// Zero rows affected is reported as a count, never as an error; errors are
/// reserved for infrastructure failures.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a new refresh token record
    ///
    /// The insert is atomic: it either creates the full row or nothing.
    /// A duplicate `token_hash` must be rejected by the store's uniqueness
    /// constraint.
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, StoreError>;

    /// Find a refresh token by its hashed value
    ///
    /// # Example
    /// ```no_run
    /// # use sl_core::repositories::SessionStore;
    /// # async fn example(store: &impl SessionStore) -> Result<(), Box<dyn std::error::Error>> {
    /// match store.find_by_hash("sha256_hash_of_token").await? {
    ///     Some(token) => println!("token belongs to user {}", token.user_id),
    ///     None => println!("unknown token"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, StoreError>;

    /// Record a successful validation on a token
    ///
    /// Best-effort from the caller's perspective; failures do not abort a
    /// rotation.
    async fn touch_last_used(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), StoreError>;

    /// Conditionally revoke one token by hash
    ///
    /// Sets `revoked_at = now` only where the record is still active
    /// (`revoked_at IS NULL AND expires_at > now`). Returns the number of
    /// rows changed: 1 when this caller performed the revocation, 0 when the
    /// token was unknown, already revoked, or expired.
    async fn revoke_by_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, StoreError>;

    /// Revoke every active token belonging to a user
    ///
    /// Returns the number of tokens revoked. Used by the optional
    /// revoke-all-on-reuse containment policy.
    async fn revoke_all_for_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, StoreError>;

    /// Bulk-delete inactive records
    ///
    /// Removes every record that went dead (was revoked or expired) before
    /// `cutoff`. A record freshly revoked inside the grace window stays
    /// inspectable until the cutoff passes its revocation time. Active
    /// records are never touched. Returns the number of rows deleted.
    async fn delete_inactive(&self, cutoff: DateTime<Utc>) -> Result<u64, StoreError>;

    /// Check whether a token exists and is active as of `now`
    async fn is_active(&self, token_hash: &str, now: DateTime<Utc>) -> Result<bool, StoreError> {
        match self.find_by_hash(token_hash).await? {
            Some(token) => Ok(token.is_active(now)),
            None => Ok(false),
        }
    }
}
