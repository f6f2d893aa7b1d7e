use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::CategorizeError;

use super::STATUS_HEADER;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Body did not match the request schema.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Categorize(#[from] CategorizeError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    /// HTTP status and status-header value for this error.
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::InvalidRequest(_)
            | GatewayError::Categorize(CategorizeError::InvalidRequest { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
            GatewayError::Categorize(CategorizeError::InvalidData(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_data")
            }
            GatewayError::Categorize(CategorizeError::Embedding(_)) => {
                (StatusCode::BAD_GATEWAY, "embedding_error")
            }
            GatewayError::Categorize(CategorizeError::Retrieval(_)) => {
                (StatusCode::BAD_GATEWAY, "retrieval_error")
            }
            GatewayError::Categorize(CategorizeError::CategoryStore(_)) => {
                (StatusCode::BAD_GATEWAY, "category_store_error")
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, outcome) = self.classify();

        let mut headers = HeaderMap::new();
        headers.insert(STATUS_HEADER, HeaderValue::from_static(outcome));

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
