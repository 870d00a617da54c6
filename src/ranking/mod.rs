pub mod tfidf;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

use crate::core::{Candidate, ScoredCandidate};
use crate::error::Result;

pub use tfidf::{rank_titles, TfidfRanker};

/// Default number of ranked results returned
pub const DEFAULT_TOP_K: usize = 5;

/// Trait for re-ranking implementations
pub trait Ranker: Send + Sync {
    /// Rank candidates against query, return sorted by score (highest first)
    fn rank(&self, query: &str, candidates: &[Candidate], options: &RankOptions) -> Result<Vec<ScoredCandidate>>;

    /// Get ranker name for logging
    fn name(&self) -> &str;
}

/// Per-call ranking options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankOptions {
    /// Maximum number of results
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Drop the single best match after sorting (assumed to be the query itself)
    #[serde(default)]
    pub exclude_top_match: bool,

    /// Drop candidates with this id (the caller's "self" entry)
    #[serde(default)]
    pub exclude_id: Option<String>,

    /// Keep only the first of repeated (id, title) pairs
    #[serde(default)]
    pub deduplicate: bool,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            exclude_top_match: false,
            exclude_id: None,
            deduplicate: false,
        }
    }
}

impl RankOptions {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn excluding_top_match(mut self) -> Self {
        self.exclude_top_match = true;
        self
    }

    pub fn excluding_id(mut self, id: impl Into<String>) -> Self {
        self.exclude_id = Some(id.into());
        self
    }

    pub fn deduplicated(mut self) -> Self {
        self.deduplicate = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RankOptions::default();
        assert_eq!(options.top_k, 5);
        assert!(!options.exclude_top_match);
        assert!(options.exclude_id.is_none());
        assert!(!options.deduplicate);
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: RankOptions = serde_json::from_str(r#"{"exclude_top_match": true}"#).unwrap();
        assert_eq!(options.top_k, DEFAULT_TOP_K);
        assert!(options.exclude_top_match);
    }

    #[test]
    fn test_ranker_trait_object() {
        let ranker: Box<dyn Ranker> = Box::new(TfidfRanker::new());
        assert_eq!(ranker.name(), "tfidf");

        let candidates = vec![Candidate::new("1", "Heat")];
        let ranked = ranker.rank("heat", &candidates, &RankOptions::default()).unwrap();
        assert_eq!(ranked.len(), 1);
    }
}
