use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::config::{EngineConfig, RankingConfig};
use crate::core::{
    Candidate, Genre, MovieDetails, MovieResult, Recommendation, RecommendationResponse, ScoredCandidate,
};
use crate::error::Result;
use crate::providers::{MovieProvider, TmdbProvider};
use crate::ranking::{RankOptions, Ranker, TfidfRanker};

/// Main movie discovery orchestrator
pub struct MovieEngine {
    provider: Arc<dyn MovieProvider>,
    ranker: Arc<dyn Ranker>,
    ranking: RankingConfig,
}

/// Recommendation request parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendQuery {
    pub query: String,
    /// Overrides the configured `top_k`
    #[serde(default)]
    pub top_k: Option<usize>,
    /// Overrides the configured skip-best behavior
    #[serde(default)]
    pub exclude_top_match: Option<bool>,
    #[serde(default)]
    pub deduplicate: bool,
}

impl RecommendQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: None,
            exclude_top_match: None,
            deduplicate: false,
        }
    }
}

/// A genre with its most popular movies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreShelf {
    pub genre: Genre,
    pub movies: Vec<MovieResult>,
}

impl MovieEngine {
    /// Create an engine over one provider with the TF-IDF ranker
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self {
            provider,
            ranker: Arc::new(TfidfRanker::new()),
            ranking: RankingConfig::default(),
        }
    }

    /// Create an engine backed by TMDB from config
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let provider = Arc::new(TmdbProvider::from_config(&config.tmdb)?);
        tracing::info!("TMDB provider initialized ({})", config.tmdb.base_url);
        Ok(Self::new(provider).with_ranking_config(config.ranking.clone()))
    }

    pub fn with_ranking_config(mut self, ranking: RankingConfig) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn ranker_name(&self) -> &str {
        self.ranker.name()
    }

    /// Rank caller-supplied candidates without touching the provider
    pub fn rank(&self, query: &str, candidates: &[Candidate], options: &RankOptions) -> Result<Vec<ScoredCandidate>> {
        self.ranker.rank(query, candidates, options)
    }

    /// Look up the first search hit for `query` and fetch its details.
    ///
    /// Returns `Ok(None)` for a blank query or when nothing matches.
    pub async fn lookup(&self, query: &str) -> Result<Option<MovieDetails>> {
        if query.trim().is_empty() {
            return Ok(None);
        }

        let results = self.provider.search(query).await?;
        let Some(first) = results.first() else {
            tracing::debug!("No movie found for '{}'", query);
            return Ok(None);
        };

        let details = self.provider.get_details(first.id).await?;
        tracing::info!("'{}' -> {}", query, details.movie.display_name());
        Ok(Some(details))
    }

    /// Fetch details for a known movie id
    pub async fn details(&self, id: u64) -> Result<MovieDetails> {
        self.provider.get_details(id).await
    }

    /// Recommend movies lexically similar to the query.
    ///
    /// Candidates are the provider's search results for the query. A blank
    /// query or an empty candidate list yields an empty response; provider
    /// failures propagate.
    pub async fn recommend(&self, request: RecommendQuery) -> Result<RecommendationResponse> {
        let start = Instant::now();

        if request.query.trim().is_empty() {
            return Ok(RecommendationResponse::empty(
                &request.query,
                self.provider.name(),
                self.ranker.name(),
            ));
        }

        let movies = self.provider.search(&request.query).await?;
        if movies.is_empty() {
            let mut response =
                RecommendationResponse::empty(&request.query, self.provider.name(), self.ranker.name());
            response.latency_ms = start.elapsed().as_secs_f64() * 1000.0;
            return Ok(response);
        }

        let candidates: Vec<Candidate> = movies
            .iter()
            .map(|m| Candidate::new(m.id.to_string(), m.title.clone()))
            .collect();

        let mut options = self.ranking.rank_options();
        if let Some(top_k) = request.top_k {
            options.top_k = top_k;
        }
        if let Some(exclude_top_match) = request.exclude_top_match {
            options.exclude_top_match = exclude_top_match;
        }
        options.deduplicate = request.deduplicate;

        let ranked = self.ranker.rank(&request.query, &candidates, &options)?;

        let recommendations = ranked
            .into_iter()
            .map(|scored| Recommendation {
                movie: movies[scored.input_index].clone(),
                score: scored.score,
                rank: scored.rank,
            })
            .collect();

        let response = RecommendationResponse {
            query: request.query.clone(),
            recommendations,
            candidates_considered: movies.len(),
            provider: self.provider.name().to_string(),
            ranking_method: self.ranker.name().to_string(),
            latency_ms: start.elapsed().as_secs_f64() * 1000.0,
        };

        tracing::debug!("{}", response.display());
        Ok(response)
    }

    /// All movie genres
    pub async fn genres(&self) -> Result<Vec<Genre>> {
        self.provider.genres().await
    }

    /// Most popular movies of a genre, at most `limit` (configured shelf size if `None`)
    pub async fn movies_by_genre(&self, genre_id: u64, limit: Option<usize>) -> Result<Vec<MovieResult>> {
        let limit = limit.unwrap_or(self.ranking.genre_shelf_size);
        let mut movies = self.provider.discover_by_genre(genre_id).await?;
        movies.truncate(limit);
        Ok(movies)
    }

    /// One shelf per genre. A genre whose movies fail to load is skipped.
    pub async fn genre_shelves(&self, limit: Option<usize>) -> Result<Vec<GenreShelf>> {
        let genres = self.provider.genres().await?;
        let mut shelves = Vec::with_capacity(genres.len());

        for genre in genres {
            match self.movies_by_genre(genre.id, limit).await {
                Ok(movies) => shelves.push(GenreShelf { genre, movies }),
                Err(e) => {
                    tracing::warn!("Skipping genre {} ({}): {}", genre.name, genre.id, e);
                }
            }
        }

        Ok(shelves)
    }

    /// Check whether the provider answers
    pub async fn is_available(&self) -> bool {
        self.provider.is_available().await
    }
}
