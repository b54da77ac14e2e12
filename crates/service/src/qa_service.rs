use std::sync::Arc;

use querygpt_core::{
    LlmOutcome, MAX_QUESTION_CHARS, NewQaSession, PageRequest, PaginatedResult, PaginationConfig,
    QaSession, SessionStats, UserId,
};
use querygpt_llm::LlmGateway;
use querygpt_storage::StorageBackend;
use querygpt_storage::traits::{SessionStore, StatsStore};

use crate::error::ServiceError;

/// Result of asking a question.
///
/// The LLM outcome is always present; `session_id` is `None` when the record
/// could not be stored.
#[derive(Debug, Clone)]
pub struct AskResult {
    pub outcome: LlmOutcome,
    pub session_id: Option<i64>,
}

pub struct QaService {
    storage: Arc<StorageBackend>,
    gateway: Arc<LlmGateway>,
    pagination: PaginationConfig,
}

impl QaService {
    #[must_use]
    pub const fn new(
        storage: Arc<StorageBackend>,
        gateway: Arc<LlmGateway>,
        pagination: PaginationConfig,
    ) -> Self {
        Self { storage, gateway, pagination }
    }

    /// Validates, asks the gateway, then stores the exchange best-effort.
    ///
    /// Upstream LLM failures are not errors: they come back inside the outcome.
    pub async fn ask(
        &self,
        user_id: &UserId,
        question: &str,
        requested_provider: Option<&str>,
    ) -> Result<AskResult, ServiceError> {
        let question = validate_question(question)?;
        tracing::info!(user_id = %user_id, question_chars = question.chars().count(), "processing question");

        let outcome = self.gateway.get_answer(question, Some(user_id), requested_provider).await;

        let record = NewQaSession::from_outcome(user_id.clone(), question, &outcome);
        let session_id = match self.storage.insert_session(&record).await {
            Ok(stored) => {
                tracing::info!(user_id = %user_id, session_id = stored.id, "session saved");
                Some(stored.id)
            },
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "failed to save session, returning answer anyway");
                None
            },
        };

        Ok(AskResult { outcome, session_id })
    }

    /// One page of the caller's history, newest first. Absent inputs use the
    /// configured defaults; out-of-range inputs are clamped.
    pub async fn history(
        &self,
        user_id: &UserId,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<PaginatedResult<QaSession>, ServiceError> {
        let request = PageRequest::clamped(
            page.unwrap_or(1),
            size.unwrap_or_else(|| i64::from(self.pagination.default_page_size)),
            self.pagination.max_page_size,
        );
        let result = self.storage.list_sessions(user_id, request).await?;
        tracing::debug!(
            user_id = %user_id,
            page = result.page,
            size = result.size,
            returned = result.items.len(),
            total = result.total,
            "history retrieved"
        );
        Ok(result)
    }

    pub async fn delete_session(&self, user_id: &UserId, session_id: i64) -> Result<(), ServiceError> {
        if session_id <= 0 {
            return Err(ServiceError::InvalidInput("Invalid session ID".to_owned()));
        }
        match self.storage.delete_session(user_id, session_id).await {
            Ok(()) => {
                tracing::info!(user_id = %user_id, session_id, "session deleted");
                Ok(())
            },
            Err(e) if e.is_not_found() => {
                tracing::warn!(user_id = %user_id, session_id, "session not found or not owned by caller");
                Err(ServiceError::NotFound("Session not found or access denied".to_owned()))
            },
            Err(e) => Err(e.into()),
        }
    }

    pub async fn clear_history(&self, user_id: &UserId) -> Result<u64, ServiceError> {
        let deleted = self.storage.delete_all_sessions(user_id).await?;
        tracing::info!(user_id = %user_id, deleted, "history cleared");
        Ok(deleted)
    }

    pub async fn stats(&self, user_id: &UserId) -> Result<SessionStats, ServiceError> {
        Ok(self.storage.session_stats(user_id).await?)
    }
}

fn validate_question(question: &str) -> Result<&str, ServiceError> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput("Question cannot be empty".to_owned()));
    }
    if trimmed.chars().count() > MAX_QUESTION_CHARS {
        return Err(ServiceError::InvalidInput(format!(
            "Question must be at most {MAX_QUESTION_CHARS} characters"
        )));
    }
    Ok(trimmed)
}
