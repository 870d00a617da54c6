//! # Movie Discovery Engine
//!
//! Movie discovery backend with:
//! - TF-IDF + cosine similarity re-ranking of candidate titles
//! - TMDB metadata provider (search, details, genres, discover)
//! - Genre shelves and a local short film catalog
//! - Multiple interfaces: Rust library, Python bindings, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust
//! use movie_engine::{rank_titles, Candidate, RankOptions};
//!
//! let candidates = vec![
//!     Candidate::new("1", "Inception"),
//!     Candidate::new("2", "Titanic"),
//!     Candidate::new("3", "Inception Day"),
//! ];
//!
//! let ranked = rank_titles("Inception", &candidates, &RankOptions::default().with_top_k(2)).unwrap();
//! let ids: Vec<&str> = ranked.iter().map(|s| s.id()).collect();
//! assert_eq!(ids, vec!["1", "3"]);
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod films;
pub mod preprocess;
pub mod providers;
pub mod ranking;

// Re-export primary types
pub use config::EngineConfig;
pub use core::{Candidate, Genre, MovieDetails, MovieResult, RecommendationResponse, ScoredCandidate};
pub use engine::{GenreShelf, MovieEngine, RecommendQuery};
pub use error::{MovieEngineError, Result};
pub use films::{ShortFilm, ShortFilmCatalog};
pub use ranking::{rank_titles, RankOptions, Ranker, TfidfRanker};

// Python bindings
#[cfg(feature = "python")]
pub mod python;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
