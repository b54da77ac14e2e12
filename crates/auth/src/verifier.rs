use std::sync::Arc;
use std::time::Duration;

use querygpt_core::{AuthConfig, Environment, UserId};

use crate::bearer::bearer_token;
use crate::error::AuthError;
use crate::strategy::{
    RemoteSessionMode, RemoteSessionStrategy, UnverifiedJwtStrategy, VerificationStrategy,
};

/// Ordered strategy table for the configured environment.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    strategies: Arc<[Box<dyn VerificationStrategy>]>,
}

impl TokenVerifier {
    /// Builds the table for `config.environment`.
    ///
    /// Development: remote session lookup (when a secret is set), then
    /// unverified JWT decoding. Production: remote session verify only.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AuthError::ClientInit(e.to_string()))?;

        let remote = |mode| -> Result<Option<Box<dyn VerificationStrategy>>, AuthError> {
            config
                .clerk_secret_key
                .clone()
                .map(|secret| {
                    RemoteSessionStrategy::new(client.clone(), &config.clerk_api_url, secret, mode)
                        .map(|s| Box::new(s) as Box<dyn VerificationStrategy>)
                })
                .transpose()
        };

        let strategies: Vec<Box<dyn VerificationStrategy>> = match config.environment {
            Environment::Development => remote(RemoteSessionMode::Lookup)?
                .into_iter()
                .chain(std::iter::once(Box::new(UnverifiedJwtStrategy) as Box<dyn VerificationStrategy>))
                .collect(),
            Environment::Production => remote(RemoteSessionMode::Verify)?.into_iter().collect(),
        };

        if strategies.is_empty() {
            tracing::warn!("no auth strategies available: production mode without CLERK_SECRET_KEY rejects every request");
        } else {
            tracing::info!(
                environment = config.environment.as_str(),
                strategies = ?strategies.iter().map(|s| s.name()).collect::<Vec<_>>(),
                "token verifier ready"
            );
        }

        Ok(Self { strategies: strategies.into() })
    }

    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Tries each strategy in order; the first success wins.
    pub async fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        tracing::debug!(token_len = token.len(), "verifying bearer token");
        for strategy in self.strategies.iter() {
            match strategy.verify(token).await {
                Ok(user_id) => {
                    tracing::info!(user_id = %user_id, strategy = strategy.name(), "authenticated");
                    return Ok(user_id);
                },
                Err(e) => {
                    tracing::debug!(strategy = strategy.name(), error = %e, "strategy rejected token");
                },
            }
        }
        tracing::warn!("authentication failed - invalid or expired token");
        Err(AuthError::InvalidToken)
    }

    /// Resolves the raw `Authorization` header value.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<UserId, AuthError> {
        let Some(token) = header.and_then(bearer_token) else {
            tracing::warn!("no authentication credentials provided");
            return Err(AuthError::MissingCredentials);
        };
        self.verify_token(token).await
    }

    /// Like [`Self::authenticate`] but yields `None` instead of failing.
    pub async fn authenticate_optional(&self, header: Option<&str>) -> Option<UserId> {
        let token = header.and_then(bearer_token)?;
        self.verify_token(token).await.ok()
    }
}
