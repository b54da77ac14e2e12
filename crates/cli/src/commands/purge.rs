use anyhow::Result;
use chrono::{Duration, Utc};
use querygpt_core::AppConfig;
use querygpt_storage::traits::MaintenanceStore;

use crate::open_storage;

pub(crate) async fn run(config: &AppConfig, days: u32) -> Result<()> {
    let cutoff = Utc::now() - Duration::days(i64::from(days));
    let storage = open_storage(config).await?;

    let deleted = storage.purge_older_than(cutoff).await?;
    storage.close().await;

    tracing::info!(deleted, days, %cutoff, "purge finished");
    println!("Deleted {deleted} sessions older than {days} days");
    Ok(())
}
