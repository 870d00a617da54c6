pub mod memory;
pub mod tmdb;

use async_trait::async_trait;
use crate::core::{Genre, MovieDetails, MovieResult};
use crate::error::Result;

pub use memory::InMemoryProvider;
pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers (TMDB, etc.)
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search for movies by free-text query, in provider order
    async fn search(&self, query: &str) -> Result<Vec<MovieResult>>;

    /// Get movie details with credits
    async fn get_details(&self, id: u64) -> Result<MovieDetails>;

    /// List all movie genres
    async fn genres(&self) -> Result<Vec<Genre>>;

    /// Popular movies of one genre, most popular first
    async fn discover_by_genre(&self, genre_id: u64) -> Result<Vec<MovieResult>>;

    /// Get provider name
    fn name(&self) -> &str;

    /// Check if provider is available
    async fn is_available(&self) -> bool;
}
