//! Configuration for the session service

use chrono::Duration;
use sl_shared::config::SessionConfig;

/// Containment policy applied when a rotated-away token is replayed
///
/// The store does not track session-family linkage between successive
/// rotations, so revoking only the replayed token is the conservative
/// default. Operators wanting stronger containment can opt into revoking
/// the user's entire active session set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReusePolicy {
    /// Reject the replayed token and touch nothing else (default)
    RevokeReusedOnly,
    /// Additionally revoke every active session of the affected user
    RevokeAllUserSessions,
}

/// Configuration for [`SessionService`](super::SessionService)
#[derive(Debug, Clone)]
pub struct SessionServiceConfig {
    /// How long issued refresh tokens live
    pub refresh_token_ttl: Duration,
    /// What to do when token reuse is detected
    pub reuse_policy: ReusePolicy,
}

impl Default for SessionServiceConfig {
    fn default() -> Self {
        Self {
            refresh_token_ttl: Duration::days(
                crate::domain::entities::session::REFRESH_TOKEN_EXPIRY_DAYS,
            ),
            reuse_policy: ReusePolicy::RevokeReusedOnly,
        }
    }
}

impl From<&SessionConfig> for SessionServiceConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            refresh_token_ttl: Duration::days(config.refresh_token_ttl_days),
            reuse_policy: if config.revoke_all_on_reuse {
                ReusePolicy::RevokeAllUserSessions
            } else {
                ReusePolicy::RevokeReusedOnly
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_conservative() {
        let config = SessionServiceConfig::default();
        assert_eq!(config.reuse_policy, ReusePolicy::RevokeReusedOnly);
        assert_eq!(config.refresh_token_ttl, Duration::days(7));
    }

    #[test]
    fn test_from_shared_config() {
        let mut shared = SessionConfig::default().with_ttl_days(30);
        shared.revoke_all_on_reuse = true;

        let config = SessionServiceConfig::from(&shared);
        assert_eq!(config.refresh_token_ttl, Duration::days(30));
        assert_eq!(config.reuse_policy, ReusePolicy::RevokeAllUserSessions);
    }
}
