//! Mock implementation of SessionStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::session::RefreshToken;
use crate::errors::StoreError;

use super::r#trait::SessionStore;

/// In-memory session store for tests
///
/// Mutations take the write lock for their full duration, so the
/// conditional-revoke semantics match what a relational store's atomic
/// UPDATE provides.
pub struct MockSessionStore {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl MockSessionStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of records currently stored
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Fetch a record by id, for test assertions
    pub async fn get_by_id(&self, id: Uuid) -> Option<RefreshToken> {
        self.tokens
            .read()
            .await
            .values()
            .find(|t| t.id == id)
            .cloned()
    }
}

impl Default for MockSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, StoreError> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token_hash) {
            return Err(StoreError::Internal {
                message: "duplicate token hash".to_string(),
            });
        }

        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, StoreError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).cloned())
    }

    async fn touch_last_used(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), StoreError> {
        let mut tokens = self.tokens.write().await;
        if let Some(token) = tokens.values_mut().find(|t| t.id == id) {
            token.touch(now);
        }
        Ok(())
    }

    async fn revoke_by_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(token_hash) {
            Some(token) if token.is_active(now) => {
                token.revoke(now);
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn revoke_all_for_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let mut tokens = self.tokens.write().await;
        let mut count = 0;

        for token in tokens.values_mut() {
            if token.user_id == user_id && token.is_active(now) {
                token.revoke(now);
                count += 1;
            }
        }

        Ok(count)
    }

    async fn delete_inactive(&self, cutoff: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        // A record is dead from its revocation or its expiry, whichever
        // came first; only records dead since before the cutoff go.
        tokens.retain(|_, token| {
            let dead_since = match token.revoked_at {
                Some(revoked_at) => revoked_at.min(token.expires_at),
                None => token.expires_at,
            };
            dead_since >= cutoff
        });

        Ok((initial_count - tokens.len()) as u64)
    }
}
