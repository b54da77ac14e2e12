//! Schema migration command.
//!
//! Runs the idempotent migrations and a connectivity check.

use anyhow::{Result, bail};
use querygpt_core::AppConfig;
use querygpt_storage::StorageBackend;
use querygpt_storage::traits::MaintenanceStore;

pub(crate) async fn run(config: &AppConfig) -> Result<()> {
    let Some(url) = config.database.url.as_deref() else {
        bail!("DATABASE_URL (or DB_HOST) must be set to run migrations");
    };

    // Connecting runs the migrations.
    let storage = StorageBackend::new_postgres(url).await?;
    storage.ping().await?;
    storage.close().await;

    println!("Migrations applied to {}", config.database.redacted_url().unwrap_or_default());
    Ok(())
}
