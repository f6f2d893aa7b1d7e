//! Scripted neighbor index for tests.

use std::sync::Arc;

use parking_lot::RwLock;

use super::client::NeighborIndex;
use super::error::VectorDbError;
use super::model::NeighborResult;

/// Returns canned matches: the `i`-th query vector gets the `i`-th scripted list.
///
/// Vectors beyond the scripted lists get no matches. Lists are truncated to `k`.
#[derive(Default, Clone)]
pub struct MockNeighborIndex {
    responses: Arc<RwLock<Vec<Vec<NeighborResult>>>>,
    calls: Arc<RwLock<Vec<(usize, u64)>>>,
    fail_with: Arc<RwLock<Option<String>>>,
}

impl MockNeighborIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the matches returned for the query vector at `position`.
    pub fn respond(&self, position: usize, matches: Vec<NeighborResult>) {
        let mut responses = self.responses.write();
        if responses.len() <= position {
            responses.resize(position + 1, Vec::new());
        }
        responses[position] = matches;
    }

    /// Makes every subsequent query fail as if the service were unreachable.
    pub fn fail_searches(&self, message: &str) {
        *self.fail_with.write() = Some(message.to_string());
    }

    /// `(vector count, k)` for each call received.
    pub fn calls(&self) -> Vec<(usize, u64)> {
        self.calls.read().clone()
    }
}

impl NeighborIndex for MockNeighborIndex {
    async fn nearest_neighbors(
        &self,
        vectors: &[Vec<f32>],
        k: u64,
    ) -> Result<Vec<Vec<NeighborResult>>, VectorDbError> {
        self.calls.write().push((vectors.len(), k));

        if let Some(message) = self.fail_with.read().clone() {
            return Err(VectorDbError::SearchFailed {
                collection: "mock".to_string(),
                message,
            });
        }

        if let Some(index) = vectors.iter().position(Vec::is_empty) {
            return Err(VectorDbError::EmptyVector { index });
        }

        let responses = self.responses.read();
        Ok((0..vectors.len())
            .map(|i| {
                responses
                    .get(i)
                    .map(|matches| matches.iter().take(k as usize).cloned().collect())
                    .unwrap_or_default()
            })
            .collect())
    }
}
