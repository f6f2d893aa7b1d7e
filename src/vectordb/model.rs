use qdrant_client::qdrant::ScoredPoint;

use crate::catalog::ProductId;
use crate::constants::{NEIGHBOR_ID_SUFFIX_LEN, strip_neighbor_suffix};

use super::VectorDbError;

/// One match from the neighbor index. Lives for a single retrieval call.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborResult {
    /// Raw identifier: product id followed by the fixed-length suffix.
    pub identifier: String,
    /// Embedding distance in `[0, 1]`, 0 being the closest match.
    pub distance: f32,
}

impl NeighborResult {
    pub fn new(identifier: impl Into<String>, distance: f32) -> Self {
        Self {
            identifier: identifier.into(),
            distance,
        }
    }

    /// Drops the trailing suffix to recover the product id.
    pub fn product_id(&self) -> Result<ProductId, VectorDbError> {
        strip_neighbor_suffix(&self.identifier)
            .map(str::to_string)
            .ok_or_else(|| VectorDbError::MalformedIdentifier {
                identifier: self.identifier.clone(),
                suffix_len: NEIGHBOR_ID_SUFFIX_LEN,
            })
    }

    /// Reads the identifier from `id_field` in the point payload.
    pub fn from_scored_point(
        point: &ScoredPoint,
        id_field: &str,
        collection: &str,
    ) -> Result<Self, VectorDbError> {
        let identifier = point
            .payload
            .get(id_field)
            .and_then(|v| v.as_str())
            .ok_or_else(|| VectorDbError::MalformedResult {
                collection: collection.to_string(),
                message: format!("point payload has no string field '{}'", id_field),
            })?;

        if point.score.is_nan() {
            return Err(VectorDbError::MalformedResult {
                collection: collection.to_string(),
                message: format!("point '{}' has a NaN score", identifier),
            });
        }

        Ok(Self::new(identifier.clone(), score_to_distance(point.score)))
    }
}

/// Converts a cosine similarity score into a distance in `[0, 1]`.
pub fn score_to_distance(score: f32) -> f32 {
    (1.0 - score).clamp(0.0, 1.0)
}
