//! Provider-level entry point: one question in, one [`LlmOutcome`] out.

use std::time::{Duration, Instant};

use querygpt_core::{HealthStatus, LlmConfig, LlmOutcome, LlmProvider, UserId, unix_timestamp};
use serde::Serialize;

use crate::ai_types::{ChatRequest, Message};
use crate::client::LlmClient;

/// Fixed instruction sent ahead of every user question.
pub const SYSTEM_PROMPT: &str = "You are a helpful travel documentation assistant. When users ask about travel requirements, provide comprehensive, accurate, and up-to-date information including:
1. Visa requirements and application process
2. Passport requirements (validity period, blank pages)
3. Additional supporting documents
4. Health requirements (vaccinations, health certificates)
5. Travel advisories and restrictions
6. Useful tips and recommendations

Format your response clearly with sections and bullet points for easy reading.
Be conversational and helpful while maintaining accuracy.";

/// Self-reported gateway state. Does not contact the provider.
#[derive(Debug, Clone, Serialize)]
pub struct LlmHealth {
    pub status: HealthStatus,
    pub provider: &'static str,
    pub api_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: f64,
}

/// Gateway to the configured chat-completion provider.
///
/// Constructed once at startup and shared; safe for concurrent use.
#[derive(Debug)]
pub struct LlmGateway {
    provider: LlmProvider,
    client: Option<LlmClient>,
    init_error: Option<String>,
    max_tokens: u32,
    temperature: f32,
}

impl LlmGateway {
    /// Builds the gateway. Never fails: a missing key or a broken HTTP client
    /// is remembered and reported through [`Self::health_check`] and every answer.
    pub fn new(config: &LlmConfig) -> Self {
        let label = config.provider.label();
        let (client, init_error) = match config.api_key.clone() {
            None => (None, Some(format!("{label} API key not configured"))),
            Some(key) => match LlmClient::new(
                key,
                &config.base_url,
                config.model.clone(),
                Duration::from_secs(config.timeout_secs),
            ) {
                Ok(client) => (Some(client), None),
                Err(e) => (None, Some(e.to_string())),
            },
        };

        match init_error.as_deref() {
            Some(err) => tracing::warn!(provider = %config.provider, error = err, "LLM gateway not configured"),
            None => tracing::info!(provider = %config.provider, model = %config.model, "{label} API client initialized"),
        }

        Self {
            provider: config.provider,
            client,
            init_error,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Asks the configured provider. Upstream failures become a failed outcome.
    ///
    /// `requested_provider` is advisory: the configured provider always answers.
    pub async fn get_answer(
        &self,
        question: &str,
        user_id: Option<&UserId>,
        requested_provider: Option<&str>,
    ) -> LlmOutcome {
        let started = Instant::now();
        let user = user_id.map_or("anonymous", UserId::as_str);

        if let Some(requested) = requested_provider.filter(|p| {
            !p.eq_ignore_ascii_case("default") && !p.eq_ignore_ascii_case(self.provider.as_str())
        }) {
            tracing::debug!(
                requested,
                configured = %self.provider,
                "requested provider differs from configured provider, using configured"
            );
        }

        match self.provider {
            LlmProvider::DeepSeek => self.call_chat(question, user, started).await,
            other => {
                tracing::info!(user_id = user, provider = %other, "provider requested but not implemented");
                LlmOutcome::failure(
                    other.as_str(),
                    format!("{} integration not implemented", other.label()),
                    elapsed_ms(started),
                )
            },
        }
    }

    async fn call_chat(&self, question: &str, user: &str, started: Instant) -> LlmOutcome {
        let provider = self.provider.as_str();
        let label = self.provider.label();

        let Some(client) = self.client.as_ref() else {
            let reason = self.init_error.clone().unwrap_or_else(|| format!("{label} API client not configured"));
            tracing::error!(user_id = user, error = %reason, "LLM call skipped");
            return LlmOutcome::failure(provider, reason, elapsed_ms(started));
        };

        tracing::info!(user_id = user, "Making request to {label} API");
        tracing::debug!(question_chars = question.chars().count(), "question length");

        let request = ChatRequest {
            model: client.model().to_owned(),
            messages: vec![Message::system(SYSTEM_PROMPT), Message::user(question)],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: false,
        };

        match client.chat_completion(&request).await {
            Ok(answer) => {
                let elapsed = elapsed_ms(started);
                tracing::info!(user_id = user, elapsed_ms = elapsed, "{label} API response received");
                LlmOutcome::success(provider, answer, elapsed)
            },
            Err(e) => {
                let elapsed = elapsed_ms(started);
                let kind = e.kind();
                tracing::error!(user_id = user, elapsed_ms = elapsed, ?kind, error = %e, "{label} API call failed");
                LlmOutcome::failure(provider, e.user_message(label), elapsed)
            },
        }
    }

    /// Whether the gateway believes it can serve requests.
    #[must_use]
    pub fn health_check(&self) -> LlmHealth {
        let error = match (self.provider, &self.client) {
            (LlmProvider::DeepSeek, Some(_)) => None,
            (LlmProvider::DeepSeek, None) => Some(
                self.init_error.clone().unwrap_or_else(|| "API client not properly configured".to_owned()),
            ),
            (other, _) => Some(format!("{} integration not implemented", other.label())),
        };
        LlmHealth {
            status: HealthStatus::from_ok(error.is_none()),
            provider: self.provider.as_str(),
            api_configured: self.client.is_some(),
            error,
            timestamp: unix_timestamp(),
        }
    }
}

fn elapsed_ms(started: Instant) -> i64 {
    i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX)
}
