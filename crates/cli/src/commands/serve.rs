use std::sync::Arc;

use anyhow::Result;
use querygpt_auth::TokenVerifier;
use querygpt_core::AppConfig;
use querygpt_http::{AppState, create_router};
use querygpt_llm::LlmGateway;
use querygpt_service::{HealthService, QaService};

use crate::open_storage;

pub(crate) async fn run(config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    tracing::info!(
        environment = config.auth.environment.as_str(),
        provider = %config.llm.provider,
        "starting querygpt"
    );

    let storage = Arc::new(open_storage(&config).await?);
    let gateway = Arc::new(LlmGateway::new(&config.llm));
    let verifier = TokenVerifier::from_config(&config.auth)?;

    let state = Arc::new(AppState {
        qa_service: Arc::new(QaService::new(
            Arc::clone(&storage),
            Arc::clone(&gateway),
            config.pagination,
        )),
        health_service: Arc::new(HealthService::new(Arc::clone(&storage), gateway)),
        verifier,
    });

    let router = create_router(state, &config.server.cors_origins);
    let host = host.unwrap_or(config.server.host);
    let port = port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    storage.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
