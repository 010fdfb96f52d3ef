use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{classify::ServerErrorsFailureClass, cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

use crate::api::handlers::*;
use crate::assessment::Assessor;

#[derive(Clone)]
pub struct AppState {
    pub assessor: Arc<Assessor>,
}

pub fn create_router(assessor: Arc<Assessor>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/assess", post(assess))
        .route("/chat", post(chat))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::span!(
                        Level::INFO,
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                    tracing::info!("request received: {} {}", request.method(), request.uri());
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                        tracing::info!(
                            "response sent: status={} latency={:.2}ms",
                            response.status(),
                            latency.as_secs_f64() * 1000.0
                        );
                    },
                )
                .on_failure(
                    |error: ServerErrorsFailureClass, latency: std::time::Duration, _span: &tracing::Span| {
                        tracing::error!(
                            "request failed: {:?} latency={:.2}ms",
                            error,
                            latency.as_secs_f64() * 1000.0
                        );
                    },
                ),
        )
        .layer(CorsLayer::permissive())
        .with_state(AppState { assessor })
}
