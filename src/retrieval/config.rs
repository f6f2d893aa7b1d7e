use crate::constants::DEFAULT_NUM_NEIGHBORS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrieverConfig {
    /// Matches requested per embedding vector when the caller does not say.
    pub num_neighbors: u64,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            num_neighbors: DEFAULT_NUM_NEIGHBORS,
        }
    }
}

impl RetrieverConfig {
    pub fn num_neighbors(mut self, k: u64) -> Self {
        self.num_neighbors = k;
        self
    }
}
