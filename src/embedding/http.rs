use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use super::client::{Embedder, ImageRef, MultimodalEmbedding};
use super::error::EmbeddingError;

#[derive(Debug, Clone)]
pub struct HttpEmbedderConfig {
    /// Full URL of the `predict` endpoint.
    pub endpoint: String,
    /// Sent as a bearer token when present.
    pub api_key: Option<String>,
}

impl HttpEmbedderConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.endpoint.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "endpoint cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Client for a multimodal embedding `predict` endpoint.
///
/// Request: `{"instances":[{"text": .., "image": {"bytesBase64Encoded"|"gcsUri": ..}}]}`.
/// Response: `{"predictions":[{"textEmbedding": [..], "imageEmbedding": [..]}]}`.
#[derive(Clone)]
pub struct HttpEmbedder {
    client: reqwest::Client,
    config: HttpEmbedderConfig,
}

impl std::fmt::Debug for HttpEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEmbedder")
            .field("endpoint", &self.config.endpoint)
            .field("authenticated", &self.config.api_key.is_some())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    text_embedding: Option<Vec<f32>>,
    image_embedding: Option<Vec<f32>>,
}

impl HttpEmbedder {
    pub fn new(config: HttpEmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;
        Ok(Self {
            client: reqwest::Client::new(),
            config,
        })
    }

    pub fn config(&self) -> &HttpEmbedderConfig {
        &self.config
    }

    async fn image_payload(image: &ImageRef) -> Result<Value, EmbeddingError> {
        match image {
            ImageRef::LocalPath(path) => {
                let bytes =
                    tokio::fs::read(path)
                        .await
                        .map_err(|e| EmbeddingError::ImageUnreadable {
                            path: path.clone(),
                            reason: e.to_string(),
                        })?;
                Ok(json!({ "bytesBase64Encoded": STANDARD.encode(bytes) }))
            }
            ImageRef::RemoteUri(uri) => Ok(json!({ "gcsUri": uri })),
            ImageRef::InlineBase64(data) => Ok(json!({ "bytesBase64Encoded": data })),
        }
    }
}

/// Builds the request body for one description and optional encoded image.
pub(crate) fn build_request_body(text: &str, image: Option<Value>) -> Value {
    let mut instance = json!({ "text": text });
    if let Some(image) = image {
        instance["image"] = image;
    }
    json!({ "instances": [instance] })
}

/// Extracts the first prediction, requiring an image vector when one was requested.
pub(crate) fn parse_predict_response(
    response: PredictResponse,
    image_requested: bool,
) -> Result<MultimodalEmbedding, EmbeddingError> {
    let prediction =
        response
            .predictions
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InvalidResponse {
                reason: "response contained no predictions".to_string(),
            })?;

    let text = prediction
        .text_embedding
        .filter(|v| !v.is_empty())
        .ok_or_else(|| EmbeddingError::InvalidResponse {
            reason: "prediction is missing textEmbedding".to_string(),
        })?;

    let image = if image_requested {
        let image = prediction
            .image_embedding
            .filter(|v| !v.is_empty())
            .ok_or(EmbeddingError::MissingImageEmbedding)?;
        Some(image)
    } else {
        None
    };

    Ok(MultimodalEmbedding { text, image })
}

impl Embedder for HttpEmbedder {
    async fn embed(
        &self,
        text: &str,
        image: Option<&ImageRef>,
    ) -> Result<MultimodalEmbedding, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyText);
        }

        let image_payload = match image {
            Some(image) => Some(Self::image_payload(image).await?),
            None => None,
        };
        let body = build_request_body(text, image_payload);

        debug!(
            text_len = text.len(),
            with_image = image.is_some(),
            "Requesting embeddings"
        );

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PredictResponse = response.json().await?;
        parse_predict_response(parsed, image.is_some())
    }
}
