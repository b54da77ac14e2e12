//! MaintenanceStore implementation for PgStorage.

use super::*;

use crate::traits::MaintenanceStore;
use async_trait::async_trait;

#[async_trait]
impl MaintenanceStore for PgStorage {
    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, StorageError> {
        let mut tx = self.pool.begin().await?;
        let deleted = sqlx::query("DELETE FROM qa_sessions WHERE created_at < $1")
            .bind(cutoff)
            .execute(&mut *tx)
            .await;

        match deleted {
            Ok(result) => {
                tx.commit().await?;
                Ok(result.rows_affected())
            },
            Err(e) => {
                rollback(tx, "purge_older_than").await;
                Err(e.into())
            },
        }
    }
}
