//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use querygpt_core::{NewQaSession, PageRequest, PaginatedResult, QaSession, SessionStats, UserId};

use crate::error::StorageError;
use crate::traits::{MaintenanceStore, SessionStore, StatsStore};
use crate::{MemoryStorage, PgStorage};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <PgStorage as $trait>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <MemoryStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PgStorage),
    Memory(MemoryStorage),
}

impl StorageBackend {
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(PgStorage::new(database_url).await?))
    }

    pub fn new_memory() -> Self {
        Self::Memory(MemoryStorage::new())
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Releases pooled connections. A no-op for the memory backend.
    pub async fn close(&self) {
        if let Self::Postgres(pg) = self {
            pg.close().await;
        }
    }
}

// ── SessionStore ─────────────────────────────────────────────────

#[async_trait]
impl SessionStore for StorageBackend {
    async fn insert_session(&self, session: &NewQaSession) -> Result<QaSession, StorageError> {
        dispatch!(self, SessionStore, insert_session(session))
    }

    async fn list_sessions(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<PaginatedResult<QaSession>, StorageError> {
        dispatch!(self, SessionStore, list_sessions(user_id, page))
    }

    async fn delete_session(&self, user_id: &UserId, id: i64) -> Result<(), StorageError> {
        dispatch!(self, SessionStore, delete_session(user_id, id))
    }

    async fn delete_all_sessions(&self, user_id: &UserId) -> Result<u64, StorageError> {
        dispatch!(self, SessionStore, delete_all_sessions(user_id))
    }
}

// ── StatsStore ───────────────────────────────────────────────────

#[async_trait]
impl StatsStore for StorageBackend {
    async fn session_stats(&self, user_id: &UserId) -> Result<SessionStats, StorageError> {
        dispatch!(self, StatsStore, session_stats(user_id))
    }
}

// ── MaintenanceStore ─────────────────────────────────────────────

#[async_trait]
impl MaintenanceStore for StorageBackend {
    async fn ping(&self) -> Result<(), StorageError> {
        dispatch!(self, MaintenanceStore, ping())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, StorageError> {
        dispatch!(self, MaintenanceStore, purge_older_than(cutoff))
    }
}
