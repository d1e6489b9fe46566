//! HTTP gateway (Axum) for artifact assessment.
//!
//! This module is primarily used by the `symbi` server binary.

#![allow(missing_docs)]

pub mod context;
pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use handler::{
    assess_handler, compare_assessments_handler, delete_assessment_handler, emergence_handler,
    get_assessment_handler, list_assessments_handler, metrics_handler, score_preview_handler,
    word_count_handler,
};
pub use state::HandlerState;

use symbi::{KvStore, SYMBI_STATUS_HEADER};

use crate::gateway::payload::HealthResponse;

pub fn create_router_with_state<S>(state: HandlerState<S>) -> Router
where
    S: KvStore + Clone,
{
    let mut router = Router::new()
        .route("/healthz", get(health_handler))
        .route("/assess", post(assess_handler::<S>))
        .route(
            "/assess/{id}",
            get(get_assessment_handler::<S>).delete(delete_assessment_handler::<S>),
        )
        .route("/assessments", get(list_assessments_handler::<S>))
        .route("/emergence", get(emergence_handler::<S>))
        .route("/compare-assessments", get(compare_assessments_handler::<S>))
        .route("/metrics", get(metrics_handler::<S>));

    if state.debug_routes {
        tracing::warn!("Debug routes enabled");
        router = router
            .route("/debug/word-count", post(word_count_handler))
            .route("/debug/score-preview", post(score_preview_handler::<S>));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(SYMBI_STATUS_HEADER, HeaderValue::from_static("healthy"));

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
        .into_response()
}
