use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument};

use symbi::{KvStore, RecordStatus, SYMBI_STATUS_HEADER, word_count_report};

use crate::gateway::context::request_context;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{AssessRequest, ContentRequest, DeleteResponse, EmergenceQuery};
use crate::gateway::state::HandlerState;

/// Accepts an artifact; scoring continues in the background when the record is `processing`.
#[instrument(skip(state, headers, body), fields(tenant_id = tracing::field::Empty))]
pub async fn assess_handler<S>(
    State(state): State<HandlerState<S>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    S: KvStore + Clone,
{
    let request: AssessRequest = serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;
    let submission = request.into_submission()?;

    let ctx = request_context(&headers);
    tracing::Span::current().record("tenant_id", tracing::field::display(&ctx.tenant_id));

    let outcome = state.pipeline.submit(submission, &ctx).await?;
    let receipt = outcome.receipt;

    info!(
        id = %receipt.assessment_id,
        status = %receipt.status,
        word_count = receipt.word_count,
        user_id = %ctx.user_id,
        "Assessment accepted"
    );

    let code = if receipt.status == RecordStatus::Processing {
        StatusCode::ACCEPTED
    } else {
        StatusCode::OK
    };

    Ok((code, status_headers(receipt.status), Json(receipt)).into_response())
}

#[instrument(skip(state))]
pub async fn get_assessment_handler<S>(
    State(state): State<HandlerState<S>>,
    Path(id): Path<String>,
) -> Result<Response, GatewayError>
where
    S: KvStore + Clone,
{
    let record = state.pipeline.get(&id).await?;
    debug!(status = %record.status, "Assessment fetched");
    Ok((StatusCode::OK, status_headers(record.status), Json(record)).into_response())
}

#[instrument(skip(state))]
pub async fn delete_assessment_handler<S>(
    State(state): State<HandlerState<S>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, GatewayError>
where
    S: KvStore + Clone,
{
    state.pipeline.delete(&id).await?;
    Ok(Json(DeleteResponse {
        deleted: true,
        assessment_id: id,
    }))
}

#[instrument(skip(state))]
pub async fn list_assessments_handler<S>(
    State(state): State<HandlerState<S>>,
) -> Result<Response, GatewayError>
where
    S: KvStore + Clone,
{
    let records = state.pipeline.list().await?;
    debug!(count = records.len(), "Listing assessments");
    Ok(Json(records).into_response())
}

#[instrument(skip(state))]
pub async fn emergence_handler<S>(
    State(state): State<HandlerState<S>>,
    Query(query): Query<EmergenceQuery>,
) -> Result<Response, GatewayError>
where
    S: KvStore + Clone,
{
    let summary = state.pipeline.emergence(query.window()?).await?;
    Ok(Json(summary).into_response())
}

#[instrument(skip(state))]
pub async fn compare_assessments_handler<S>(
    State(state): State<HandlerState<S>>,
) -> Result<Response, GatewayError>
where
    S: KvStore + Clone,
{
    let report = state.pipeline.duplicate_report().await?;
    Ok(Json(report).into_response())
}

#[instrument(skip(state))]
pub async fn metrics_handler<S>(State(state): State<HandlerState<S>>) -> Response
where
    S: KvStore + Clone,
{
    Json(state.metrics.snapshot()).into_response()
}

#[instrument(skip(body))]
pub async fn word_count_handler(
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let content = parse_content(body)?;
    let report = word_count_report(&content);
    Ok(Json(report).into_response())
}

#[instrument(skip(state, body))]
pub async fn score_preview_handler<S>(
    State(state): State<HandlerState<S>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    S: KvStore + Clone,
{
    let content = parse_content(body)?;
    let preview = state.pipeline.preview(&content).await?;
    Ok(Json(preview).into_response())
}

fn parse_content(body: serde_json::Value) -> Result<String, GatewayError> {
    let request: ContentRequest = serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;
    request.into_content()
}

pub(crate) fn status_headers(status: RecordStatus) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(SYMBI_STATUS_HEADER, HeaderValue::from_static(status.as_str()));
    headers
}
