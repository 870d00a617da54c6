use serde::{Deserialize, Serialize};

use crate::core::MovieResult;

/// A recommended movie with its similarity to the query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub movie: MovieResult,

    /// Similarity score (0.0 - 1.0)
    pub score: f64,

    /// 0-based position in the recommendation list
    pub rank: usize,
}

/// Recommendation response with ranking metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub query: String,

    #[serde(default)]
    pub recommendations: Vec<Recommendation>,

    /// Number of candidates the provider returned
    pub candidates_considered: usize,

    /// Provider that returned the candidates
    pub provider: String,

    /// Ranking method used (tfidf)
    pub ranking_method: String,

    /// Latency in milliseconds
    pub latency_ms: f64,
}

impl RecommendationResponse {
    /// Empty response for a query with no candidates
    pub fn empty(query: impl Into<String>, provider: impl Into<String>, ranking_method: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            recommendations: Vec::new(),
            candidates_considered: 0,
            provider: provider.into(),
            ranking_method: ranking_method.into(),
            latency_ms: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.recommendations.iter().map(|r| r.movie.title.as_str()).collect()
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        format!(
            "'{}' -> {} of {} candidates [{}/{}] {:.2}ms",
            self.query,
            self.recommendations.len(),
            self.candidates_considered,
            self.provider,
            self.ranking_method,
            self.latency_ms
        )
    }
}
