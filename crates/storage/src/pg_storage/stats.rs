//! StatsStore implementation for PgStorage.

use super::*;

use crate::traits::StatsStore;
use async_trait::async_trait;
use querygpt_core::SessionStats;

#[async_trait]
impl StatsStore for PgStorage {
    async fn session_stats(&self, user_id: &UserId) -> Result<SessionStats, StorageError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE is_successful) AS successful,
                    (AVG(response_time_ms) FILTER (WHERE is_successful))::FLOAT8 AS avg_ms
             FROM qa_sessions
             WHERE user_id = $1",
        )
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        let total: i64 = row.try_get("total")?;
        let successful: i64 = row.try_get("successful")?;
        let avg_ms: Option<f64> = row.try_get("avg_ms")?;
        Ok(SessionStats::from_counts(i64_to_u64(total), i64_to_u64(successful), avg_ms))
    }
}
