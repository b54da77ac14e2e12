//! Integration tests for PgStorage.
//! Run with: DATABASE_URL=... cargo test -p querygpt-storage -- --ignored pg_

#![allow(clippy::unwrap_used, reason = "integration test code")]

use chrono::{Duration, Utc};
use querygpt_core::{LlmOutcome, NewQaSession, PageRequest, UserId};
use querygpt_storage::traits::{MaintenanceStore, SessionStore, StatsStore};
use querygpt_storage::PgStorage;

async fn create_pg_storage() -> PgStorage {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStorage integration tests");
    PgStorage::new(&url).await.expect("Failed to connect to PostgreSQL")
}

fn unique_user() -> UserId {
    UserId::new(format!("test-user-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default()))
}

fn make_record(user: &UserId, question: &str, ok: bool) -> NewQaSession {
    let outcome = if ok {
        LlmOutcome::success("deepseek", "an answer", 120)
    } else {
        LlmOutcome::failure("deepseek", "Request timeout - DeepSeek API took too long to respond", 60_000)
    };
    NewQaSession::from_outcome(user.clone(), question, &outcome)
}

#[tokio::test]
#[ignore]
async fn pg_insert_then_list_returns_newest_first() {
    let storage = create_pg_storage().await;
    let user = unique_user();

    storage.insert_session(&make_record(&user, "first", true)).await.unwrap();
    let newest = storage.insert_session(&make_record(&user, "second", false)).await.unwrap();
    assert!(!newest.is_successful);
    assert!(newest.error_message.is_some());

    let page = storage.list_sessions(&user, PageRequest::clamped(1, 50, 100)).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].id, newest.id);

    storage.delete_all_sessions(&user).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn pg_delete_other_users_session_is_not_found() {
    let storage = create_pg_storage().await;
    let owner = unique_user();
    let intruder = UserId::new(format!("{owner}-intruder"));

    let stored = storage.insert_session(&make_record(&owner, "private", true)).await.unwrap();
    let err = storage.delete_session(&intruder, stored.id).await.unwrap_err();
    assert!(err.is_not_found());

    storage.delete_session(&owner, stored.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn pg_stats_and_delete_all() {
    let storage = create_pg_storage().await;
    let user = unique_user();

    let empty = storage.session_stats(&user).await.unwrap();
    assert_eq!(empty.success_rate, 0.0);

    storage.insert_session(&make_record(&user, "a", true)).await.unwrap();
    storage.insert_session(&make_record(&user, "b", false)).await.unwrap();
    let stats = storage.session_stats(&user).await.unwrap();
    assert_eq!(stats.total_sessions, 2);
    assert_eq!(stats.successful_sessions, 1);
    assert_eq!(stats.success_rate, 50.0);
    assert_eq!(stats.average_response_time_ms, 120.0);

    assert_eq!(storage.delete_all_sessions(&user).await.unwrap(), 2);
    assert_eq!(storage.delete_all_sessions(&user).await.unwrap(), 0);
}

#[tokio::test]
#[ignore]
async fn pg_ping_and_purge() {
    let storage = create_pg_storage().await;
    storage.ping().await.unwrap();

    let user = unique_user();
    let mut old = make_record(&user, "ancient", true);
    old.created_at = Utc::now() - Duration::days(3650);
    storage.insert_session(&old).await.unwrap();

    let purged = storage.purge_older_than(Utc::now() - Duration::days(3000)).await.unwrap();
    assert!(purged >= 1);
}
