use async_trait::async_trait;
use querygpt_core::{SessionStats, UserId};

use crate::error::StorageError;

/// Aggregate statistics.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Totals, success rate and mean successful response time for one user.
    async fn session_stats(&self, user_id: &UserId) -> Result<SessionStats, StorageError>;
}
