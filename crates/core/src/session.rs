use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// One persisted question/answer exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QaSession {
    pub id: i64,
    pub user_id: UserId,
    pub question: String,
    pub answer: String,
    pub llm_provider: String,
    pub response_time_ms: i64,
    pub is_successful: bool,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A session record that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewQaSession {
    pub user_id: UserId,
    pub question: String,
    pub answer: String,
    pub llm_provider: String,
    pub response_time_ms: i64,
    pub is_successful: bool,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewQaSession {
    /// Builds the record for one gateway round trip.
    ///
    /// The error message is kept only for failed outcomes.
    pub fn from_outcome(user_id: UserId, question: impl Into<String>, outcome: &LlmOutcome) -> Self {
        Self {
            user_id,
            question: question.into(),
            answer: outcome.answer.clone(),
            llm_provider: outcome.provider.clone(),
            response_time_ms: outcome.response_time_ms,
            is_successful: outcome.is_successful,
            error_message: if outcome.is_successful { None } else { outcome.error_message.clone() },
            created_at: Utc::now(),
        }
    }

    pub fn into_session(self, id: i64) -> QaSession {
        QaSession {
            id,
            user_id: self.user_id,
            question: self.question,
            answer: self.answer,
            llm_provider: self.llm_provider,
            response_time_ms: self.response_time_ms,
            is_successful: self.is_successful,
            error_message: self.error_message,
            created_at: self.created_at,
        }
    }
}

/// Result of one LLM gateway call. Never an error: failures are encoded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LlmOutcome {
    pub answer: String,
    pub response_time_ms: i64,
    pub is_successful: bool,
    pub error_message: Option<String>,
    pub provider: String,
}

impl LlmOutcome {
    pub fn success(provider: impl Into<String>, answer: impl Into<String>, response_time_ms: i64) -> Self {
        Self {
            answer: answer.into(),
            response_time_ms,
            is_successful: true,
            error_message: None,
            provider: provider.into(),
        }
    }

    pub fn failure(provider: impl Into<String>, message: impl Into<String>, response_time_ms: i64) -> Self {
        Self {
            answer: String::new(),
            response_time_ms,
            is_successful: false,
            error_message: Some(message.into()),
            provider: provider.into(),
        }
    }
}

/// Per-user aggregate over stored sessions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SessionStats {
    pub total_sessions: u64,
    pub successful_sessions: u64,
    /// Percentage of successful sessions, 0 when there are none.
    pub success_rate: f64,
    /// Mean response time over successful sessions only.
    pub average_response_time_ms: f64,
}

impl SessionStats {
    pub fn from_counts(total: u64, successful: u64, average_success_ms: Option<f64>) -> Self {
        let success_rate = if total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss, reason = "row counts fit f64 mantissa")]
            let rate = successful as f64 / total as f64 * 100.0;
            round2(rate)
        };
        let average_response_time_ms =
            average_success_ms.filter(|v| v.is_finite()).map(round2).unwrap_or(0.0);
        Self { total_sessions: total, successful_sessions: successful, success_rate, average_response_time_ms }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_zero_total_has_zero_rate() {
        let stats = SessionStats::from_counts(0, 0, None);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.average_response_time_ms, 0.0);
        assert!(!stats.success_rate.is_nan());
    }

    #[test]
    fn stats_rate_is_percentage_rounded() {
        let stats = SessionStats::from_counts(3, 2, Some(1234.5678));
        assert_eq!(stats.success_rate, 66.67);
        assert_eq!(stats.average_response_time_ms, 1234.57);
    }

    #[test]
    fn record_from_successful_outcome_drops_error() {
        let mut outcome = LlmOutcome::success("deepseek", "answer", 12);
        outcome.error_message = Some("stale".to_owned());
        let record = NewQaSession::from_outcome(UserId::from("u1"), "q", &outcome);
        assert!(record.is_successful);
        assert_eq!(record.error_message, None);
        assert_eq!(record.llm_provider, "deepseek");
    }

    #[test]
    fn record_from_failed_outcome_keeps_error() {
        let outcome = LlmOutcome::failure("deepseek", "Network error", 5);
        let record = NewQaSession::from_outcome(UserId::from("u1"), "q", &outcome);
        assert!(!record.is_successful);
        assert_eq!(record.answer, "");
        assert_eq!(record.error_message.as_deref(), Some("Network error"));
    }
}
