//! Individual ways of turning a token into a user id.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use querygpt_core::UserId;
use serde::Deserialize;

use crate::error::AuthError;

/// One entry of the verification table.
#[async_trait]
pub trait VerificationStrategy: Send + Sync + std::fmt::Debug {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    async fn verify(&self, token: &str) -> Result<UserId, AuthError>;
}

/// How the auth provider is asked about a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteSessionMode {
    /// `GET {base}/v1/sessions/{token}`
    Lookup,
    /// `POST {base}/v1/sessions/verify` with `{"token": ...}`
    Verify,
}

#[derive(Debug, Deserialize)]
struct SessionPayload {
    #[serde(default)]
    user_id: Option<String>,
}

/// Resolves the token through the auth provider's backend API.
pub struct RemoteSessionStrategy {
    client: reqwest::Client,
    base_url: reqwest::Url,
    secret_key: String,
    mode: RemoteSessionMode,
}

impl std::fmt::Debug for RemoteSessionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSessionStrategy")
            .field("base_url", &self.base_url.as_str())
            .field("secret_key", &"***")
            .field("mode", &self.mode)
            .finish()
    }
}

impl RemoteSessionStrategy {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        secret_key: String,
        mode: RemoteSessionMode,
    ) -> Result<Self, AuthError> {
        let base_url = reqwest::Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| AuthError::ClientInit(format!("invalid auth provider URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AuthError::ClientInit(format!("auth provider URL {base_url} cannot be a base")));
        }
        Ok(Self { client, base_url, secret_key, mode })
    }

    /// `{base}/v1/sessions/{segment}` with `segment` escaped as a single path segment.
    fn sessions_url(&self, segment: &str) -> Result<reqwest::Url, AuthError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AuthError::rejected(self.name(), "auth provider URL cannot be a base"))?
            .pop_if_empty()
            .extend(["v1", "sessions", segment]);
        Ok(url)
    }
}

/// Alphabet accepted as a single session-id path segment.
fn is_session_token(token: &str) -> bool {
    !token.is_empty()
        && token != "."
        && token != ".."
        && token.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}

#[async_trait]
impl VerificationStrategy for RemoteSessionStrategy {
    fn name(&self) -> &'static str {
        match self.mode {
            RemoteSessionMode::Lookup => "remote-session-lookup",
            RemoteSessionMode::Verify => "remote-session-verify",
        }
    }

    async fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let name = self.name();
        let request = match self.mode {
            RemoteSessionMode::Lookup => {
                if !is_session_token(token) {
                    return Err(AuthError::rejected(name, "token is not a session id"));
                }
                self.client.get(self.sessions_url(token)?)
            },
            RemoteSessionMode::Verify => self
                .client
                .post(self.sessions_url("verify")?)
                .json(&serde_json::json!({ "token": token })),
        };

        let response = request
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| AuthError::rejected(name, e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(AuthError::rejected(name, format!("auth provider returned {status}")));
        }

        let payload: SessionPayload =
            response.json().await.map_err(|e| AuthError::rejected(name, e.to_string()))?;
        payload
            .user_id
            .filter(|id| !id.is_empty())
            .map(UserId::new)
            .ok_or_else(|| AuthError::rejected(name, "response carries no user_id"))
    }
}

/// Reads the subject out of a JWT payload without checking the signature
/// or expiry. Only ever registered in development mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnverifiedJwtStrategy;

const SUBJECT_CLAIMS: [&str; 3] = ["sub", "user_id", "userId"];

impl UnverifiedJwtStrategy {
    pub(crate) fn subject(token: &str) -> Result<UserId, AuthError> {
        let name = "unverified-jwt";
        let mut parts = token.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::rejected(name, "token is not a three-part JWT"));
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| AuthError::rejected(name, format!("payload is not base64url: {e}")))?;
        let claims: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::rejected(name, format!("payload is not JSON: {e}")))?;

        SUBJECT_CLAIMS
            .iter()
            .filter_map(|claim| claims.get(claim).and_then(serde_json::Value::as_str))
            .find(|value| !value.is_empty())
            .map(UserId::from)
            .ok_or_else(|| AuthError::rejected(name, "no subject claim in payload"))
    }
}

#[async_trait]
impl VerificationStrategy for UnverifiedJwtStrategy {
    fn name(&self) -> &'static str {
        "unverified-jwt"
    }

    async fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        Self::subject(token)
    }
}
