//! Unit tests for the mock session store

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::session::RefreshToken;
use crate::repositories::session::{MockSessionStore, SessionStore};

fn token_with_hash(user_id: Uuid, hash: &str, now: DateTime<Utc>) -> RefreshToken {
    RefreshToken::new(
        user_id,
        hash.to_string(),
        None,
        None,
        now,
        Duration::days(7),
    )
}

#[tokio::test]
async fn test_insert_and_find_by_hash() {
    let store = MockSessionStore::new();
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let token = token_with_hash(user_id, "test_hash", now);
    let saved = store.insert(token.clone()).await.unwrap();
    assert_eq!(saved.id, token.id);

    let found = store.find_by_hash("test_hash").await.unwrap().unwrap();
    assert_eq!(found.id, token.id);
    assert_eq!(found.user_id, user_id);

    assert!(store.find_by_hash("other_hash").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_hash_rejected() {
    let store = MockSessionStore::new();
    let now = Utc::now();

    let first = token_with_hash(Uuid::new_v4(), "same_hash", now);
    let second = token_with_hash(Uuid::new_v4(), "same_hash", now);

    store.insert(first).await.unwrap();
    assert!(store.insert(second).await.is_err());
}

#[tokio::test]
async fn test_conditional_revoke_changes_one_row_once() {
    let store = MockSessionStore::new();
    let now = Utc::now();

    store
        .insert(token_with_hash(Uuid::new_v4(), "h", now))
        .await
        .unwrap();

    assert_eq!(store.revoke_by_hash("h", now).await.unwrap(), 1);
    // Already revoked: the condition no longer matches
    assert_eq!(store.revoke_by_hash("h", now).await.unwrap(), 0);
    // Unknown hash
    assert_eq!(store.revoke_by_hash("missing", now).await.unwrap(), 0);
}

#[tokio::test]
async fn test_revoke_skips_expired_tokens() {
    let store = MockSessionStore::new();
    let now = Utc::now();

    let mut token = token_with_hash(Uuid::new_v4(), "h", now);
    token.expires_at = now - Duration::hours(1);
    store.insert(token).await.unwrap();

    assert_eq!(store.revoke_by_hash("h", now).await.unwrap(), 0);
}

#[tokio::test]
async fn test_revoke_all_for_user_counts_active_only() {
    let store = MockSessionStore::new();
    let user_id = Uuid::new_v4();
    let other_user = Uuid::new_v4();
    let now = Utc::now();

    store
        .insert(token_with_hash(user_id, "a", now))
        .await
        .unwrap();
    store
        .insert(token_with_hash(user_id, "b", now))
        .await
        .unwrap();
    store
        .insert(token_with_hash(other_user, "c", now))
        .await
        .unwrap();
    store.revoke_by_hash("b", now).await.unwrap();

    let revoked = store.revoke_all_for_user(user_id, now).await.unwrap();
    assert_eq!(revoked, 1);

    // The other user's session is untouched
    assert!(store.is_active("c", now).await.unwrap());
}

#[tokio::test]
async fn test_touch_last_used() {
    let store = MockSessionStore::new();
    let now = Utc::now();

    let token = token_with_hash(Uuid::new_v4(), "h", now);
    let id = token.id;
    store.insert(token).await.unwrap();

    let used = now + Duration::minutes(1);
    store.touch_last_used(id, used).await.unwrap();

    let found = store.find_by_hash("h").await.unwrap().unwrap();
    assert_eq!(found.last_used_at, Some(used));
}

#[tokio::test]
async fn test_delete_inactive_respects_cutoff() {
    let store = MockSessionStore::new();
    let now = Utc::now();
    let cutoff = now - Duration::days(7);

    // Active token, old: kept
    let mut active = token_with_hash(Uuid::new_v4(), "active", now - Duration::days(10));
    active.expires_at = now + Duration::days(7);
    store.insert(active).await.unwrap();

    // Revoked long ago: deleted
    let mut old_revoked = token_with_hash(Uuid::new_v4(), "old_revoked", now - Duration::days(10));
    old_revoked.revoked_at = Some(now - Duration::days(9));
    store.insert(old_revoked).await.unwrap();

    // Revoked two hours ago, inside the grace window: kept
    let mut fresh_revoked = token_with_hash(Uuid::new_v4(), "fresh_revoked", now - Duration::days(1));
    fresh_revoked.revoked_at = Some(now - Duration::hours(2));
    store.insert(fresh_revoked).await.unwrap();

    // Expired long ago, never revoked: deleted
    let mut expired = token_with_hash(Uuid::new_v4(), "expired", now - Duration::days(20));
    expired.expires_at = now - Duration::days(13);
    store.insert(expired).await.unwrap();

    let deleted = store.delete_inactive(cutoff).await.unwrap();
    assert_eq!(deleted, 2);

    assert!(store.find_by_hash("active").await.unwrap().is_some());
    assert!(store.find_by_hash("fresh_revoked").await.unwrap().is_some());
    assert!(store.find_by_hash("old_revoked").await.unwrap().is_none());
    assert!(store.find_by_hash("expired").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_inactive_keeps_recently_revoked_old_token() {
    let store = MockSessionStore::new();
    let now = Utc::now();

    // A long-lived session revoked a minute ago: the grace window counts
    // from the revocation, not from when the record was created
    let mut token = token_with_hash(Uuid::new_v4(), "h", now - Duration::days(30));
    token.expires_at = now + Duration::days(30);
    token.revoked_at = Some(now - Duration::minutes(1));
    store.insert(token).await.unwrap();

    let deleted = store.delete_inactive(now - Duration::days(7)).await.unwrap();
    assert_eq!(deleted, 0);
    assert!(store.find_by_hash("h").await.unwrap().is_some());

    // Once the revocation itself is past the cutoff, the record goes
    let deleted = store.delete_inactive(now).await.unwrap();
    assert_eq!(deleted, 1);
    assert!(store.find_by_hash("h").await.unwrap().is_none());
}

#[tokio::test]
async fn test_is_active_default_method() {
    let store = MockSessionStore::new();
    let now = Utc::now();

    store
        .insert(token_with_hash(Uuid::new_v4(), "h", now))
        .await
        .unwrap();

    assert!(store.is_active("h", now).await.unwrap());
    assert!(!store.is_active("missing", now).await.unwrap());

    store.revoke_by_hash("h", now).await.unwrap();
    assert!(!store.is_active("h", now).await.unwrap());
}
