use std::sync::Arc;

use querygpt_core::{HealthStatus, unix_timestamp};
use querygpt_llm::{LlmGateway, LlmHealth};
use querygpt_storage::StorageBackend;
use querygpt_storage::traits::MaintenanceStore;

/// Combined view of the gateway self-report and a database ping.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub database: HealthStatus,
    pub llm: LlmHealth,
    pub timestamp: f64,
}

impl HealthReport {
    #[must_use]
    pub fn message(&self) -> &'static str {
        if self.status.is_healthy() {
            "All services operational"
        } else {
            "Some services have issues"
        }
    }
}

pub struct HealthService {
    storage: Arc<StorageBackend>,
    gateway: Arc<LlmGateway>,
}

impl HealthService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, gateway: Arc<LlmGateway>) -> Self {
        Self { storage, gateway }
    }

    /// Never fails; a failed check marks the report unhealthy.
    pub async fn check(&self) -> HealthReport {
        let llm = self.gateway.health_check();
        let database = match self.storage.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => {
                tracing::warn!(backend = self.storage.kind(), error = %e, "database health check failed");
                HealthStatus::Unhealthy
            },
        };
        let status = HealthStatus::from_ok(llm.status.is_healthy() && database.is_healthy());
        HealthReport { status, database, llm, timestamp: unix_timestamp() }
    }
}
