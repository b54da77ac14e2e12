//! SessionStore implementation for PgStorage.

use super::*;

use crate::traits::SessionStore;
use async_trait::async_trait;
use querygpt_core::{NewQaSession, PageRequest, PaginatedResult};

#[async_trait]
impl SessionStore for PgStorage {
    async fn insert_session(&self, session: &NewQaSession) -> Result<QaSession, StorageError> {
        let mut tx = self.pool.begin().await?;
        let inserted = sqlx::query(&format!(
            "INSERT INTO qa_sessions
               (user_id, question, answer, llm_provider, response_time_ms,
                is_successful, error_message, created_at)
             VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(session.user_id.as_str())
        .bind(&session.question)
        .bind(&session.answer)
        .bind(&session.llm_provider)
        .bind(session.response_time_ms)
        .bind(session.is_successful)
        .bind(session.error_message.as_deref())
        .bind(session.created_at)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(row) => {
                let stored = row_to_session(&row)?;
                tx.commit().await?;
                Ok(stored)
            },
            Err(e) => {
                rollback(tx, "insert_session").await;
                Err(e.into())
            },
        }
    }

    async fn list_sessions(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<PaginatedResult<QaSession>, StorageError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM qa_sessions WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM qa_sessions
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(user_id.as_str())
        .bind(i64::from(page.size()))
        .bind(u64_to_i64(page.offset()))
        .fetch_all(&self.pool)
        .await?;

        let items = rows.iter().map(row_to_session).collect::<Result<Vec<_>, _>>()?;
        Ok(PaginatedResult::new(items, i64_to_u64(total), page))
    }

    async fn delete_session(&self, user_id: &UserId, id: i64) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;
        let deleted = sqlx::query("DELETE FROM qa_sessions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id.as_str())
            .execute(&mut *tx)
            .await;

        match deleted {
            Ok(result) if result.rows_affected() > 0 => {
                tx.commit().await?;
                Ok(())
            },
            Ok(_) => {
                rollback(tx, "delete_session").await;
                Err(StorageError::NotFound { entity: "session", id: id.to_string() })
            },
            Err(e) => {
                rollback(tx, "delete_session").await;
                Err(e.into())
            },
        }
    }

    async fn delete_all_sessions(&self, user_id: &UserId) -> Result<u64, StorageError> {
        let mut tx = self.pool.begin().await?;
        let deleted = sqlx::query("DELETE FROM qa_sessions WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&mut *tx)
            .await;

        match deleted {
            Ok(result) => {
                tx.commit().await?;
                Ok(result.rows_affected())
            },
            Err(e) => {
                rollback(tx, "delete_all_sessions").await;
                Err(e.into())
            },
        }
    }
}
