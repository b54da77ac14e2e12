use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use querygpt_core::SessionStats;

use crate::AppState;
use crate::api_error::ApiError;
use crate::auth::AuthUser;
use crate::query_types::{AskRequest, HistoryQuery};
use crate::response_types::{
    AskResponse, ClearHistoryResponse, HistoryItem, HistoryResponse, MessageResponse,
};

pub async fn ask(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(req) = body.map_err(|e| {
        tracing::debug!(error = %e, "rejected ask body");
        ApiError::BadRequest("Invalid request body".to_owned())
    })?;
    let result = state
        .qa_service
        .ask(&user_id, &req.question, req.llm_provider.as_deref())
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to process question. Please try again."))?;

    let outcome = result.outcome;
    Ok(Json(AskResponse {
        answer: outcome.answer,
        response_time_ms: outcome.response_time_ms,
        is_successful: outcome.is_successful,
        error_message: if outcome.is_successful {
            String::new()
        } else {
            outcome.error_message.unwrap_or_default()
        },
        session_id: result.session_id,
    }))
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Query(query) = query.map_err(|e| {
        tracing::debug!(error = %e, "rejected history query");
        ApiError::BadRequest("Invalid query parameters".to_owned())
    })?;
    let page = state
        .qa_service
        .history(&user_id, query.page(), query.size())
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to retrieve conversation history"))?;

    Ok(Json(HistoryResponse {
        sessions: page.items.into_iter().map(HistoryItem::from).collect(),
        total: page.total,
        page: page.page,
        size: page.size,
    }))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(session_id) = id.map_err(|_| ApiError::BadRequest("Invalid session ID".to_owned()))?;
    state
        .qa_service
        .delete_session(&user_id, session_id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to delete session"))?;
    Ok(Json(MessageResponse { message: "Session deleted successfully".to_owned() }))
}

pub async fn clear_history(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ClearHistoryResponse>, ApiError> {
    let deleted_count = state
        .qa_service
        .clear_history(&user_id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to clear conversation history"))?;
    Ok(Json(ClearHistoryResponse {
        message: format!("Successfully cleared {deleted_count} sessions"),
        deleted_count,
    }))
}

pub async fn stats(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<SessionStats>, ApiError> {
    state
        .qa_service
        .stats(&user_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to retrieve user statistics"))
}
