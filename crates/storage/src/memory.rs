//! In-process storage backend.
//!
//! Same semantics as [`PgStorage`](crate::PgStorage), backed by a vector
//! behind an async lock. Used when no database is configured and by tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use querygpt_core::{
    NewQaSession, PageRequest, PaginatedResult, QaSession, SessionStats, UserId,
};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::{MaintenanceStore, SessionStore, StatsStore};

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i64,
    sessions: Vec<QaSession>,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    state: Arc<RwLock<MemoryState>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates an outage: while set, every operation fails with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("memory store marked unavailable".into()))
        } else {
            Ok(())
        }
    }
}

fn newest_first(a: &QaSession, b: &QaSession) -> std::cmp::Ordering {
    b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
}

#[async_trait]
impl SessionStore for MemoryStorage {
    async fn insert_session(&self, session: &NewQaSession) -> Result<QaSession, StorageError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        state.next_id += 1;
        let stored = session.clone().into_session(state.next_id);
        state.sessions.push(stored.clone());
        Ok(stored)
    }

    async fn list_sessions(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<PaginatedResult<QaSession>, StorageError> {
        self.check_available()?;
        let state = self.state.read().await;
        let mut owned: Vec<&QaSession> =
            state.sessions.iter().filter(|s| &s.user_id == user_id).collect();
        owned.sort_by(|a, b| newest_first(a, b));
        let total = owned.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = owned
            .into_iter()
            .skip(offset)
            .take(page.size() as usize)
            .cloned()
            .collect();
        Ok(PaginatedResult::new(items, total, page))
    }

    async fn delete_session(&self, user_id: &UserId, id: i64) -> Result<(), StorageError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let position = state.sessions.iter().position(|s| s.id == id && &s.user_id == user_id);
        match position {
            Some(index) => {
                state.sessions.remove(index);
                Ok(())
            },
            None => Err(StorageError::NotFound { entity: "session", id: id.to_string() }),
        }
    }

    async fn delete_all_sessions(&self, user_id: &UserId) -> Result<u64, StorageError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|s| &s.user_id != user_id);
        Ok((before - state.sessions.len()) as u64)
    }
}

#[async_trait]
impl StatsStore for MemoryStorage {
    async fn session_stats(&self, user_id: &UserId) -> Result<SessionStats, StorageError> {
        self.check_available()?;
        let state = self.state.read().await;
        let owned: Vec<&QaSession> =
            state.sessions.iter().filter(|s| &s.user_id == user_id).collect();
        let successful: Vec<i64> =
            owned.iter().filter(|s| s.is_successful).map(|s| s.response_time_ms).collect();
        #[allow(clippy::cast_precision_loss, reason = "response times fit f64 mantissa")]
        let average = (!successful.is_empty())
            .then(|| successful.iter().sum::<i64>() as f64 / successful.len() as f64);
        Ok(SessionStats::from_counts(owned.len() as u64, successful.len() as u64, average))
    }
}

#[async_trait]
impl MaintenanceStore for MemoryStorage {
    async fn ping(&self) -> Result<(), StorageError> {
        self.check_available()
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, StorageError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|s| s.created_at >= cutoff);
        Ok((before - state.sessions.len()) as u64)
    }
}
