//! HTTP API server for querygpt.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod auth;
mod handlers;
mod query_types;
mod response_types;


use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use querygpt_auth::TokenVerifier;
use querygpt_service::{HealthService, QaService};

pub use auth::{AuthUser, MaybeUser};

/// Shared application state for all HTTP handlers.
///
/// Everything is built once at startup and injected here.
pub struct AppState {
    pub qa_service: Arc<QaService>,
    pub health_service: Arc<HealthService>,
    pub verifier: TokenVerifier,
}

pub fn create_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/qa/ask", post(handlers::qa::ask))
        .route("/qa/history", get(handlers::qa::history).delete(handlers::qa::clear_history))
        .route("/qa/history/{id}", delete(handlers::qa::delete_session))
        .route("/qa/stats", get(handlers::qa::stats))
        .route("/health", get(handlers::health::health))
        .route("/health/simple", get(handlers::health::simple_health));

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::liveness))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
}
