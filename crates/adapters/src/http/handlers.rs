//! Request handlers

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use halal_check_domain::{CheckResponse, usecases::CheckError};
use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub(super) async fn check_halal(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<CheckResponse>) {
    let span = tracing::info_span!("check_halal", request_id = %Uuid::new_v4());
    let body = parse_json_body(&headers, &body);

    let (error, response) = state.usecase.respond(body.as_ref()).instrument(span).await;

    let status = error.as_ref().map(status_for).unwrap_or(StatusCode::OK);
    (status, Json(response))
}

/// HTTP status for each failure kind
pub fn status_for(error: &CheckError) -> StatusCode {
    match error {
        CheckError::InvalidInput => StatusCode::BAD_REQUEST,
        CheckError::NotFound(_) => StatusCode::NOT_FOUND,
        CheckError::UpstreamUnreachable(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Decode the body only when it is declared as JSON; anything else is absent
fn parse_json_body(headers: &HeaderMap, body: &[u8]) -> Option<Value> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));

    if !is_json {
        tracing::debug!("Request body is not declared as JSON");
        return None;
    }

    match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::debug!(error = %error, "Failed to parse request body");
            None
        }
    }
}
