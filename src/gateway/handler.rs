use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument, warn};

use crate::catalog::CategoryStore;
use crate::embedding::Embedder;
use crate::vectordb::NeighborIndex;

use super::error::GatewayError;
use super::payload::{CategorizeRequest, CategorizeResponse};
use super::state::HandlerState;
use super::{STATUS_HEADER, STATUS_RANKED};

#[instrument(skip(state, request))]
pub async fn categorize_handler<E, N, S>(
    State(state): State<HandlerState<E, N, S>>,
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    E: Embedder + 'static,
    N: NeighborIndex + 'static,
    S: CategoryStore + 'static,
{
    let request: CategorizeRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    debug!(
        desc_len = request.description.len(),
        with_image = request.image.is_some(),
        num_neighbors = ?request.num_neighbors,
        "Processing categorize request"
    );

    let pipeline = &state.pipeline;
    let result = match request.num_neighbors {
        Some(k) => {
            pipeline
                .retrieve_and_rank(&request.description, request.image.as_ref(), k)
                .await
        }
        None => {
            pipeline
                .retrieve_and_rank_default(&request.description, request.image.as_ref())
                .await
        }
    };

    let categories = result.map_err(|e| {
        warn!(error = %e, "Categorization failed");
        GatewayError::from(e)
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(STATUS_RANKED));

    Ok((
        StatusCode::OK,
        headers,
        Json(CategorizeResponse { categories }),
    )
        .into_response())
}
