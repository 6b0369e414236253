mod posts;
mod relay;
mod statistics;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use socialproxy_imaging::{ImageFetcher, ImagingError};
use socialproxy_upstream::{UpstreamClient, UpstreamError};
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub images: ImageFetcher,
}

/// Failure of an aggregating endpoint. Always collapses to a bare 500.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("upstream call failed: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("image transcoding failed: {0}")]
    Imaging(#[from] ImagingError),

    #[error("request body is not a profile query: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    #[error("could not encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl IntoResponse for AggregateError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(error = %self, "aggregation failed");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api", post(relay::relay))
        .route("/posts", post(posts::aggregate_posts))
        .route("/statistics", post(statistics::aggregate_statistics))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthData { status: "ok" }))
}
