//! Session and refresh-token lifecycle configuration

use serde::{Deserialize, Serialize};

/// Refresh-token lifecycle configuration
///
/// Controls how long refresh credentials live, how aggressively dead
/// records are purged, and how token reuse is contained.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Refresh token time-to-live in days
    pub refresh_token_ttl_days: i64,

    /// How often the cleanup task runs, in seconds
    pub cleanup_interval_seconds: u64,

    /// Retention grace period for revoked/expired records, in days
    ///
    /// Dead records younger than this are kept for inspection before
    /// permanent deletion.
    pub cleanup_grace_days: i64,

    /// Whether the background cleanup task runs at all
    #[serde(default = "default_cleanup_enabled")]
    pub cleanup_enabled: bool,

    /// Revoke every active session of a user when one of their rotated-away
    /// tokens is replayed, instead of rejecting just the replayed token
    #[serde(default)]
    pub revoke_all_on_reuse: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_token_ttl_days: 7,
            cleanup_interval_seconds: 3600, // Run every hour
            cleanup_grace_days: 7,
            cleanup_enabled: default_cleanup_enabled(),
            revoke_all_on_reuse: false,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            refresh_token_ttl_days: env_parse("SESSION_REFRESH_TTL_DAYS")
                .unwrap_or(defaults.refresh_token_ttl_days),
            cleanup_interval_seconds: env_parse("SESSION_CLEANUP_INTERVAL_SECONDS")
                .unwrap_or(defaults.cleanup_interval_seconds),
            cleanup_grace_days: env_parse("SESSION_CLEANUP_GRACE_DAYS")
                .unwrap_or(defaults.cleanup_grace_days),
            cleanup_enabled: env_parse("SESSION_CLEANUP_ENABLED")
                .unwrap_or(defaults.cleanup_enabled),
            revoke_all_on_reuse: env_parse("SESSION_REVOKE_ALL_ON_REUSE")
                .unwrap_or(defaults.revoke_all_on_reuse),
        }
    }

    /// Set the refresh token time-to-live in days
    pub fn with_ttl_days(mut self, days: i64) -> Self {
        self.refresh_token_ttl_days = days;
        self
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn default_cleanup_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.refresh_token_ttl_days, 7);
        assert_eq!(config.cleanup_interval_seconds, 3600);
        assert_eq!(config.cleanup_grace_days, 7);
        assert!(config.cleanup_enabled);
        assert!(!config.revoke_all_on_reuse);
    }

    #[test]
    fn test_with_ttl_days() {
        let config = SessionConfig::default().with_ttl_days(30);
        assert_eq!(config.refresh_token_ttl_days, 30);
    }
}
