use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StorageError;

/// Operational checks and housekeeping.
#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    /// Trivial round trip used by health checks.
    async fn ping(&self) -> Result<(), StorageError>;

    /// Delete all sessions created before `cutoff`, across all users.
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, StorageError>;
}
