use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use querygpt_core::{HealthStatus, SERVICE_NAME};

use crate::AppState;
use crate::auth::MaybeUser;
use crate::response_types::{
    HealthResponse, LivenessResponse, RootResponse, ServiceStatus, SimpleHealthResponse,
};

/// Always 200; the body carries the verdict.
pub async fn health(
    State(state): State<Arc<AppState>>,
    MaybeUser(user_id): MaybeUser,
) -> Json<HealthResponse> {
    if let Some(user_id) = &user_id {
        tracing::debug!(user_id = %user_id, "health check by authenticated user");
    }
    let report = state.health_service.check().await;
    Json(HealthResponse {
        status: report.status,
        message: report.message().to_owned(),
        timestamp: report.timestamp,
        llm_service_status: ServiceStatus { database: report.database, llm_service: report.llm },
    })
}

pub async fn simple_health() -> Json<SimpleHealthResponse> {
    Json(SimpleHealthResponse {
        status: HealthStatus::Healthy,
        timestamp: Utc::now().to_rfc3339(),
        service: SERVICE_NAME,
    })
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Query GPT API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: HealthStatus::Healthy })
}
