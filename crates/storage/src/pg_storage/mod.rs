//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

#![allow(
    clippy::arithmetic_side_effects,
    reason = "DB row counts and pagination are bounded by PostgreSQL limits"
)]

mod maintenance;
mod sessions;
mod stats;

use std::time::Duration;

use chrono::{DateTime, Utc};
use querygpt_core::{
    PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS, PG_POOL_MAX_LIFETIME_SECS, QaSession,
    UserId,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connects, then brings the schema up to date.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .max_lifetime(Duration::from_secs(PG_POOL_MAX_LIFETIME_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!(max_connections = PG_POOL_MAX_CONNECTIONS, "PgStorage initialized");
        Ok(Self { pool })
    }

    /// Waits for checked-out connections to return, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PgStorage pool closed");
    }
}

/// Rolls back `tx`, logging (not returning) a failed rollback.
pub(crate) async fn rollback(tx: Transaction<'_, Postgres>, operation: &'static str) {
    if let Err(e) = tx.rollback().await {
        tracing::warn!(operation, error = %e, "transaction rollback failed");
    } else {
        tracing::debug!(operation, "transaction rolled back");
    }
}

pub(crate) fn row_to_session(row: &PgRow) -> Result<QaSession, StorageError> {
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let user_id: String = row.try_get("user_id")?;
    Ok(QaSession {
        id: row.try_get("id")?,
        user_id: UserId::from(user_id),
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
        llm_provider: row.try_get("llm_provider")?,
        response_time_ms: row.try_get("response_time_ms")?,
        is_successful: row.try_get("is_successful")?,
        error_message: row.try_get("error_message")?,
        created_at,
    })
}

/// Convert a row count to `i64` for SQL LIMIT/OFFSET binds, saturating.
pub(crate) fn u64_to_i64(val: u64) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

pub(crate) fn i64_to_u64(val: i64) -> u64 {
    u64::try_from(val).unwrap_or(0)
}

pub(crate) const SESSION_COLUMNS: &str = "id, user_id, question, answer, llm_provider,
     response_time_ms, is_successful, error_message, created_at";
