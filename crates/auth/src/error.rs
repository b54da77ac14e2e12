use thiserror::Error;

/// Why a request could not be attributed to a user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No usable `Authorization: Bearer` header.
    #[error("Authorization header required")]
    MissingCredentials,
    /// Every configured strategy rejected the token.
    #[error("Invalid or expired authentication token")]
    InvalidToken,
    /// A single strategy's rejection reason; never surfaced to callers.
    #[error("{strategy}: {reason}")]
    Rejected { strategy: &'static str, reason: String },
    #[error("auth client initialization failed: {0}")]
    ClientInit(String),
}

impl AuthError {
    pub(crate) fn rejected(strategy: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected { strategy, reason: reason.into() }
    }
}
