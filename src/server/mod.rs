pub mod handlers;

use crate::{Result, backend::HttpBackend, config::Config};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    handler::Handler,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Limit for form posts that carry a staged CSV back to the server. Staged
/// bytes are base64 (4/3 of the upload) and the result CSV can be wider than
/// the uploaded one, so these routes get three times the upload limit.
pub fn staged_body_limit(body_limit: usize) -> usize {
    body_limit.saturating_mul(3)
}

/// Builds the application router around any backend implementation.
pub fn router(state: AppState, body_limit: usize) -> Router {
    let staged_limit = DefaultBodyLimit::max(staged_body_limit(body_limit));

    Router::new()
        .route("/", get(handlers::about))
        .route("/health", get(handlers::health))
        .route("/single", get(handlers::single_form).post(handlers::single_submit))
        .route(
            "/batch",
            get(handlers::batch_form).post(handlers::batch_submit.layer(staged_limit)),
        )
        .route("/batch/preview", post(handlers::batch_preview))
        .route(
            "/batch/download",
            post(handlers::batch_download.layer(staged_limit)),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let backend = HttpBackend::new(config.backend.clone())?;
    info!("Using prediction backend at {}", config.backend.base_url);

    let app = router(
        AppState::new(Arc::new(backend)),
        config.server.max_upload_bytes,
    );

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
