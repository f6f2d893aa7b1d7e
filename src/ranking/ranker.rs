use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::catalog::CategoryPath;
use crate::llm::TextGenerator;

use super::config::RankerConfig;
use super::error::RankError;
use super::prompt::{build_prompt, dedup_paths, parse_response};

/// Orders candidate category paths by relevance using an LLM.
#[derive(Clone)]
pub struct CategoryRanker {
    generator: Arc<dyn TextGenerator>,
    config: RankerConfig,
}

impl std::fmt::Debug for CategoryRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryRanker")
            .field("model", &self.generator.model_name())
            .field("config", &self.config)
            .finish()
    }
}

impl CategoryRanker {
    pub fn new(generator: Arc<dyn TextGenerator>, config: RankerConfig) -> Self {
        Self { generator, config }
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Returns the candidates reordered by the LLM, with duplicates removed.
    ///
    /// Falls back to the deduplicated input order when the LLM call fails, returns nothing,
    /// or returns paths whose depth differs from the candidates'.
    #[instrument(skip_all, fields(candidates = candidates.len()))]
    pub async fn rank(&self, description: &str, candidates: &[CategoryPath]) -> Vec<CategoryPath> {
        let unique = dedup_paths(candidates.iter().cloned());
        if unique.is_empty() {
            debug!("No candidates to rank");
            return unique;
        }

        match self.try_rank(description, &unique).await {
            Ok(ranked) => {
                info!(
                    unique_candidates = unique.len(),
                    ranked = ranked.len(),
                    "LLM ranking complete"
                );
                ranked
            }
            Err(e) => {
                error!(error = %e, "LLM ranking failed");
                warn!("Falling back to original candidate ranking");
                unique
            }
        }
    }

    async fn try_rank(
        &self,
        description: &str,
        unique: &[CategoryPath],
    ) -> Result<Vec<CategoryPath>, RankError> {
        let prompt = build_prompt(description, unique);
        debug!(prompt = %prompt, "Ranking prompt");

        let response = self
            .generator
            .generate(&prompt, &self.config.generation_options())
            .await?;
        debug!(response = %response, "Ranking response");

        let parsed = parse_response(&response, unique[0].depth())?;
        let mut ranked = dedup_paths(parsed);

        if self.config.pad_missing {
            let present: HashSet<&CategoryPath> = ranked.iter().collect();
            let missing: Vec<CategoryPath> = unique
                .iter()
                .filter(|c| !present.contains(c))
                .cloned()
                .collect();
            if !missing.is_empty() {
                debug!(missing = missing.len(), "Appending candidates the LLM omitted");
                ranked.extend(missing);
            }
        }

        Ok(ranked)
    }
}
