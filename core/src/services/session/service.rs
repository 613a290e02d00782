//! Session service: issuance, rotation and revocation of refresh tokens

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::session::{IssuedToken, RefreshToken};
use crate::errors::{SessionError, SessionResult};
use crate::repositories::SessionStore;

use super::config::{ReusePolicy, SessionServiceConfig};
use super::hasher::{generate_raw_token, hash_token};

/// Service managing the refresh-token lifecycle
///
/// All time comparisons go through the injected [`Clock`]; all persistence
/// goes through the [`SessionStore`] trait. Rotation-race correctness relies
/// on the store's conditional update, not on in-process locking.
pub struct SessionService<S: SessionStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: SessionServiceConfig,
}

impl<S: SessionStore> SessionService<S> {
    /// Creates a new session service
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: SessionServiceConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Issues a new refresh token for a user at sign-in
    ///
    /// Generates a random raw token, persists its hash with
    /// `expires_at = now + ttl`, and returns the raw value to the caller.
    /// This is the only moment the raw token exists outside the client.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The session owner's UUID
    /// * `device_info` - Optional client device metadata
    /// * `ip_address` - Optional originating address
    pub async fn issue(
        &self,
        user_id: Uuid,
        device_info: Option<String>,
        ip_address: Option<String>,
    ) -> SessionResult<IssuedToken> {
        let raw_token = generate_raw_token();
        let now = self.clock.now();

        let record = RefreshToken::new(
            user_id,
            hash_token(&raw_token),
            device_info,
            ip_address,
            now,
            self.config.refresh_token_ttl,
        );

        let record = self.store.insert(record).await?;
        debug!(token_id = %record.id, %user_id, "issued refresh token");

        Ok(IssuedToken { raw_token, record })
    }

    /// Rotates a presented refresh token
    ///
    /// State machine on the lookup result:
    /// - unknown hash: [`SessionError::InvalidToken`]
    /// - revoked record: [`SessionError::TokenReuseDetected`], applying the
    ///   configured containment policy
    /// - expired record: [`SessionError::TokenExpired`]
    /// - active record: revoke it, then issue a replacement for the same
    ///   user and return the new raw token
    ///
    /// On the active path the conditional revoke arbitrates concurrent
    /// rotations: of two callers presenting the same token, exactly one
    /// observes a changed row; the loser gets `TokenReuseDetected`.
    pub async fn rotate(&self, raw_token: &str) -> SessionResult<IssuedToken> {
        let token_hash = hash_token(raw_token);
        let now = self.clock.now();

        let current = self
            .store
            .find_by_hash(&token_hash)
            .await?
            .ok_or(SessionError::InvalidToken)?;

        if current.is_revoked() {
            return Err(self.handle_reuse(&current).await?);
        }

        if current.is_expired(now) {
            debug!(token_id = %current.id, "expired refresh token presented");
            return Err(SessionError::TokenExpired);
        }

        let changed = self.store.revoke_by_hash(&token_hash, now).await?;
        if changed == 0 {
            // A concurrent rotation revoked the token between our lookup and
            // the conditional update; treat the loser as a replay.
            warn!(
                token_id = %current.id,
                user_id = %current.user_id,
                "lost rotation race, reporting reuse"
            );
            return Err(SessionError::TokenReuseDetected);
        }

        if let Err(e) = self.store.touch_last_used(current.id, now).await {
            warn!(token_id = %current.id, error = %e, "failed to record last use");
        }

        let raw_replacement = generate_raw_token();
        let replacement = RefreshToken::new(
            current.user_id,
            hash_token(&raw_replacement),
            current.device_info.clone(),
            current.ip_address.clone(),
            now,
            self.config.refresh_token_ttl,
        );

        let record = self.store.insert(replacement).await?;
        debug!(
            old_token_id = %current.id,
            new_token_id = %record.id,
            user_id = %record.user_id,
            "rotated refresh token"
        );

        Ok(IssuedToken {
            raw_token: raw_replacement,
            record,
        })
    }

    /// Revokes a refresh token at sign-out
    ///
    /// Returns `true` iff exactly one active record was revoked. Unknown,
    /// already-revoked and expired tokens return `false`; sign-out is
    /// idempotent and never fails for an already-dead session.
    pub async fn revoke(&self, raw_token: &str) -> SessionResult<bool> {
        let token_hash = hash_token(raw_token);
        let now = self.clock.now();

        let changed = self.store.revoke_by_hash(&token_hash, now).await?;
        Ok(changed == 1)
    }

    async fn handle_reuse(&self, reused: &RefreshToken) -> SessionResult<SessionError> {
        warn!(
            token_id = %reused.id,
            user_id = %reused.user_id,
            "revoked refresh token replayed"
        );

        if self.config.reuse_policy == ReusePolicy::RevokeAllUserSessions {
            let revoked = self
                .store
                .revoke_all_for_user(reused.user_id, self.clock.now())
                .await?;
            warn!(
                user_id = %reused.user_id,
                revoked,
                "revoked all user sessions after reuse"
            );
        }

        Ok(SessionError::TokenReuseDetected)
    }
}
