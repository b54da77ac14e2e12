//! Typed API error for HTTP handlers.
//!
//! Converts domain errors into HTTP responses with a JSON body and status code.
//! Handlers return `Result<Json<T>, ApiError>`.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use querygpt_auth::AuthError;
use querygpt_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` logs the real error server-side and returns the fixed
/// per-operation message to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid input from caller.
    BadRequest(String),
    /// 401 Unauthorized, with a `WWW-Authenticate: Bearer` challenge.
    Unauthorized(String),
    /// 404 Not Found: missing or owned by someone else.
    NotFound(String),
    /// 500 Internal Server Error. Details logged, not exposed.
    Internal { message: &'static str, source: anyhow::Error },
}

impl ApiError {
    /// Maps a service failure, using `message` when it is a server fault.
    pub fn from_service(err: ServiceError, message: &'static str) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            ServiceError::Storage(_) => Self::Internal { message, source: err.into() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => {
                let body = serde_json::json!({"error": msg});
                let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                return response;
            },
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal { message, source } => {
                tracing::error!(error = ?source, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => Self::Unauthorized(err.to_string()),
            AuthError::InvalidToken | AuthError::Rejected { .. } | AuthError::ClientInit(_) => {
                Self::Unauthorized(AuthError::InvalidToken.to_string())
            },
        }
    }
}
