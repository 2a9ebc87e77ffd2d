//! HTTP endpoint serving the registry.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use prometheus_client::encoding::text::encode;
use prometheus_client::registry::Registry;
use tracing::error;

const OPENMETRICS_CONTENT_TYPE: &str =
    "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// Creates the router exposing `/metrics`.
pub fn create_router(registry: Arc<Registry>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(registry)
}

async fn metrics_handler(State(registry): State<Arc<Registry>>) -> Response {
    // Collectors block on their providers, keep them off the async workers.
    let scrape = tokio::task::spawn_blocking(move || {
        let mut buffer = String::new();
        encode(&mut buffer, &registry).map(|()| buffer)
    })
    .await;

    match scrape {
        Ok(Ok(buffer)) => ([(CONTENT_TYPE, OPENMETRICS_CONTENT_TYPE)], buffer).into_response(),
        Ok(Err(_)) => {
            error!("Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            error!("Scrape task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
