//! Typed error enum for the LLM crate, plus failure classification.

use thiserror::Error;

/// Errors from LLM API operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty response: no choices returned")]
    EmptyResponse,
    #[error("empty response: choice has no content")]
    EmptyAnswer,
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

/// Closed set of failure buckets reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    Authentication,
    RateLimit,
    Timeout,
    Network,
    Other,
}

impl LlmError {
    /// Buckets the error, using structured signals before text heuristics.
    #[must_use]
    pub fn kind(&self) -> LlmErrorKind {
        match self {
            Self::HttpStatus { code: 401 | 403, .. } => LlmErrorKind::Authentication,
            Self::HttpStatus { code: 402 | 429, .. } => LlmErrorKind::RateLimit,
            Self::HttpStatus { code: 408 | 504, .. } => LlmErrorKind::Timeout,
            Self::HttpRequest(e) if e.is_timeout() => LlmErrorKind::Timeout,
            Self::HttpRequest(e) if e.is_connect() => LlmErrorKind::Network,
            _ => classify_message(&self.to_string()),
        }
    }

    /// Message shown to the caller and stored with the failed session.
    #[must_use]
    pub fn user_message(&self, provider_label: &str) -> String {
        match self {
            Self::EmptyResponse => format!("No choices in response from {provider_label} API"),
            Self::EmptyAnswer => format!("Empty response from {provider_label} API"),
            _ => match self.kind() {
                LlmErrorKind::Authentication => format!(
                    "Authentication failed. Please check your {provider_label} API key configuration."
                ),
                LlmErrorKind::RateLimit => {
                    "Rate limit exceeded or quota exhausted. Please try again later.".to_owned()
                },
                LlmErrorKind::Timeout => {
                    format!("Request timeout - {provider_label} API took too long to respond")
                },
                LlmErrorKind::Network => {
                    format!("Network error: Unable to connect to {provider_label} API")
                },
                LlmErrorKind::Other => format!("{provider_label} API error: {self}"),
            },
        }
    }
}

/// Last-resort classification by case-insensitive substring match.
///
/// Novel upstream wording can land in the wrong bucket; prefer
/// [`LlmError::kind`], which checks status codes first.
#[must_use]
pub fn classify_message(message: &str) -> LlmErrorKind {
    let lower = message.to_lowercase();
    if lower.contains("authentication") || lower.contains("unauthorized") {
        LlmErrorKind::Authentication
    } else if lower.contains("rate limit") || lower.contains("quota") {
        LlmErrorKind::RateLimit
    } else if lower.contains("timeout") || lower.contains("timed out") {
        LlmErrorKind::Timeout
    } else if lower.contains("connection") || lower.contains("network") {
        LlmErrorKind::Network
    } else {
        LlmErrorKind::Other
    }
}
