//! Response types (Serialize)

use querygpt_core::{HealthStatus, QaSession};
use querygpt_llm::LlmHealth;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub response_time_ms: i64,
    pub is_successful: bool,
    /// Empty on success.
    pub error_message: String,
    pub session_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HistoryItem {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub llm_provider: String,
    pub response_time_ms: i64,
    pub created_at: String,
    pub is_successful: bool,
}

impl From<QaSession> for HistoryItem {
    fn from(session: QaSession) -> Self {
        Self {
            id: session.id,
            question: session.question,
            answer: session.answer,
            llm_provider: session.llm_provider,
            response_time_ms: session.response_time_ms,
            created_at: session.created_at.to_rfc3339(),
            is_successful: session.is_successful,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub sessions: Vec<HistoryItem>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ClearHistoryResponse {
    pub message: String,
    pub deleted_count: u64,
}

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub database: HealthStatus,
    pub llm_service: LlmHealth,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub message: String,
    pub timestamp: f64,
    pub llm_service_status: ServiceStatus,
}

#[derive(Debug, Serialize)]
pub struct SimpleHealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: HealthStatus,
}
