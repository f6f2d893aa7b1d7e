use serde::{Deserialize, Serialize};

use crate::catalog::CategoryPath;
use crate::embedding::ImageRef;

/// Body of `POST /v1/categorize`.
///
/// ```json
/// {"description": "red shoes", "image": {"kind": "uri", "value": "gs://b/shoe.png"}, "num_neighbors": 5}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategorizeRequest {
    pub description: String,

    #[serde(default)]
    pub image: Option<ImageRef>,

    /// Falls back to the configured neighbor count.
    #[serde(default)]
    pub num_neighbors: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorizeResponse {
    /// Ranked category paths, best first.
    pub categories: Vec<CategoryPath>,
}
