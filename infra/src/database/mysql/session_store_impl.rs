//! MySQL implementation of the SessionStore trait.
//!
//! All rotation-race arbitration happens in SQL: the conditional UPDATE in
//! `revoke_by_hash` and the unique index on `token_hash` decide the winner
//! between concurrent rotations, so this implementation carries no locking
//! of its own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sl_core::domain::entities::session::RefreshToken;
use sl_core::errors::StoreError;
use sl_core::repositories::SessionStore;

/// MySQL-backed session store
pub struct MySqlSessionStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSessionStore {
    /// Create a new MySQL session store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, StoreError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| malformed("id", &e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| malformed("user_id", &e))?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id).map_err(|e| StoreError::Internal {
                message: format!("invalid token UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| StoreError::Internal {
                message: format!("invalid user UUID: {}", e),
            })?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| malformed("token_hash", &e))?,
            device_info: row
                .try_get("device_info")
                .map_err(|e| malformed("device_info", &e))?,
            ip_address: row
                .try_get("ip_address")
                .map_err(|e| malformed("ip_address", &e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| malformed("created_at", &e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| malformed("expires_at", &e))?,
            last_used_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_used_at")
                .map_err(|e| malformed("last_used_at", &e))?,
            revoked_at: row
                .try_get::<Option<DateTime<Utc>>, _>("revoked_at")
                .map_err(|e| malformed("revoked_at", &e))?,
        })
    }
}

/// Map an sqlx error to the store error taxonomy
///
/// Connection-level failures become `Unavailable` so callers can retry;
/// everything else (constraint violations, malformed rows) is `Internal`.
fn map_sqlx_err(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable {
                message: err.to_string(),
            }
        }
        _ => StoreError::Internal {
            message: err.to_string(),
        },
    }
}

fn malformed(column: &str, err: &sqlx::Error) -> StoreError {
    StoreError::Internal {
        message: format!("failed to read column {}: {}", column, err),
    }
}

#[async_trait]
impl SessionStore for MySqlSessionStore {
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, StoreError> {
        // The unique index on token_hash rejects duplicates; no read-then-
        // write existence check.
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, device_info, ip_address,
                created_at, expires_at, last_used_at, revoked_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id.to_string())
            .bind(&token.token_hash)
            .bind(&token.device_info)
            .bind(&token.ip_address)
            .bind(token.created_at)
            .bind(token.expires_at)
            .bind(token.last_used_at)
            .bind(token.revoked_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(token)
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, StoreError> {
        let query = r#"
            SELECT id, user_id, token_hash, device_info, ip_address,
                   created_at, expires_at, last_used_at, revoked_at
            FROM refresh_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn touch_last_used(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), StoreError> {
        let query = r#"
            UPDATE refresh_tokens
            SET last_used_at = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(())
    }

    async fn revoke_by_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        // Atomic conditional update: only one caller can move an active row
        // to revoked. rows_affected() = 0 means the token was unknown,
        // already revoked, or expired.
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = ?
            WHERE token_hash = ? AND revoked_at IS NULL AND expires_at > ?
        "#;

        let result = sqlx::query(query)
            .bind(now)
            .bind(token_hash)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(result.rows_affected())
    }

    async fn revoke_all_for_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked_at = ?
            WHERE user_id = ? AND revoked_at IS NULL AND expires_at > ?
        "#;

        let result = sqlx::query(query)
            .bind(now)
            .bind(user_id.to_string())
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(result.rows_affected())
    }

    async fn delete_inactive(&self, cutoff: DateTime<Utc>) -> Result<u64, StoreError> {
        // A row is dead from revoked_at or expires_at, whichever came
        // first; either being past the cutoff means it has been dead for
        // the full grace window. NULL revoked_at fails the comparison, so
        // never-revoked rows are judged on expiry alone.
        let query = r#"
            DELETE FROM refresh_tokens
            WHERE revoked_at < ? OR expires_at < ?
        "#;

        let result = sqlx::query(query)
            .bind(cutoff)
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(result.rows_affected())
    }
}
