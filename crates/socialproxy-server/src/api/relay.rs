use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::middleware::RequestId;

use super::AppState;

/// Generic relay failure; the cause is only logged, never returned.
#[derive(Debug, Serialize)]
pub(super) struct RelayFailure {
    error: &'static str,
}

impl Default for RelayFailure {
    fn default() -> Self {
        Self {
            error: "An error occurred",
        }
    }
}

impl IntoResponse for RelayFailure {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

/// `POST /api`: forwards the body to the upstream and returns its JSON verbatim.
///
/// The body is parsed here rather than by the `Json` extractor, so a missing
/// content type or malformed JSON gets the same generic 500 as an upstream
/// failure.
pub(super) async fn relay(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<Value>, RelayFailure> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "relay body is not JSON");
        RelayFailure::default()
    })?;
    state.upstream.relay(&payload).await.map(Json).map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "relay to upstream failed");
        RelayFailure::default()
    })
}
