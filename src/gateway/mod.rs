//! HTTP gateway (Axum) exposing the categorization pipeline.
//!
//! Used by the `categorizer` binary. Routes:
//! - `GET /healthz`
//! - `POST /v1/categorize`

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

use crate::catalog::CategoryStore;
use crate::embedding::Embedder;
use crate::vectordb::NeighborIndex;

pub use error::{ErrorResponse, GatewayError};
pub use handler::categorize_handler;
pub use payload::{CategorizeRequest, CategorizeResponse};
pub use state::HandlerState;

/// Response header carrying a short machine-readable outcome.
pub const STATUS_HEADER: &str = "x-categorizer-status";

pub const STATUS_HEALTHY: &str = "healthy";
pub const STATUS_RANKED: &str = "ranked";

pub fn create_router_with_state<E, N, S>(state: HandlerState<E, N, S>) -> Router
where
    E: Embedder + 'static,
    N: NeighborIndex + 'static,
    S: CategoryStore + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/v1/categorize", post(categorize_handler::<E, N, S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_HEALTHY));

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}
