use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

use crate::core::{Genre, MovieDetails, MovieResult};
use crate::error::{MovieEngineError, Result};
use crate::providers::MovieProvider;

const PROVIDER: &str = "memory";

/// Offline provider over a fixed movie list.
///
/// Search returns, in insertion order, every movie whose lowercased title
/// contains any whitespace-separated query word.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    movies: Vec<MovieResult>,
    genres: Vec<Genre>,
    credits: HashMap<u64, (Vec<String>, Vec<String>)>,
    failing_genres: HashSet<u64>,
    offline: bool,
}

impl InMemoryProvider {
    pub fn new(movies: Vec<MovieResult>) -> Self {
        Self {
            movies,
            ..Self::default()
        }
    }

    pub fn with_genres(mut self, genres: Vec<Genre>) -> Self {
        self.genres = genres;
        self
    }

    pub fn with_credits(mut self, id: u64, cast: Vec<String>, crew: Vec<String>) -> Self {
        self.credits.insert(id, (cast, crew));
        self
    }

    /// Make `discover_by_genre` fail for one genre
    pub fn with_failing_genre(mut self, genre_id: u64) -> Self {
        self.failing_genres.insert(genre_id);
        self
    }

    /// A provider whose every call fails, for exercising error paths
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            return Err(MovieEngineError::provider(PROVIDER, "provider offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl MovieProvider for InMemoryProvider {
    async fn search(&self, query: &str) -> Result<Vec<MovieResult>> {
        self.check_online()?;
        let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

        Ok(self
            .movies
            .iter()
            .filter(|m| {
                let title = m.title.to_lowercase();
                words.iter().any(|w| title.contains(w.as_str()))
            })
            .cloned()
            .collect())
    }

    async fn get_details(&self, id: u64) -> Result<MovieDetails> {
        self.check_online()?;
        let movie = self
            .movies
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| MovieEngineError::NotFound(format!("movie {}", id)))?;

        let mut details = MovieDetails::new(movie);
        details.genres = self
            .genres
            .iter()
            .filter(|g| details.movie.genre_ids.contains(&g.id))
            .cloned()
            .collect();
        if let Some((cast, crew)) = self.credits.get(&id) {
            details.cast = cast.iter().take(5).cloned().collect();
            details.crew = crew.iter().take(5).cloned().collect();
        }
        Ok(details)
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        self.check_online()?;
        Ok(self.genres.clone())
    }

    async fn discover_by_genre(&self, genre_id: u64) -> Result<Vec<MovieResult>> {
        self.check_online()?;
        if self.failing_genres.contains(&genre_id) {
            return Err(MovieEngineError::provider(PROVIDER, format!("genre {} unavailable", genre_id)));
        }
        let mut movies: Vec<MovieResult> = self
            .movies
            .iter()
            .filter(|m| m.genre_ids.contains(&genre_id))
            .cloned()
            .collect();
        movies.sort_by(|a, b| {
            b.popularity
                .unwrap_or(0.0)
                .total_cmp(&a.popularity.unwrap_or(0.0))
        });
        Ok(movies)
    }

    fn name(&self) -> &str {
        PROVIDER
    }

    async fn is_available(&self) -> bool {
        !self.offline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str, genre: u64, popularity: f64) -> MovieResult {
        let mut m = MovieResult::new(id, title);
        m.genre_ids = vec![genre];
        m.popularity = Some(popularity);
        m
    }

    #[tokio::test]
    async fn test_search_matches_any_word() {
        let provider = InMemoryProvider::new(vec![
            movie(1, "Inception", 878, 1.0),
            movie(2, "Titanic", 18, 2.0),
            movie(3, "The Inception Files", 99, 0.5),
        ]);

        let results = provider.search("INCEPTION").await.unwrap();
        let ids: Vec<u64> = results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_discover_sorted_by_popularity() {
        let provider = InMemoryProvider::new(vec![
            movie(1, "Low", 18, 1.0),
            movie(2, "High", 18, 9.0),
            movie(3, "Other", 35, 5.0),
        ]);

        let results = provider.discover_by_genre(18).await.unwrap();
        let ids: Vec<u64> = results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_details_and_missing() {
        let provider = InMemoryProvider::new(vec![movie(1, "Heat", 80, 1.0)])
            .with_genres(vec![Genre { id: 80, name: "Crime".to_string() }])
            .with_credits(1, vec!["Al Pacino".to_string()], vec!["Michael Mann".to_string()]);

        let details = provider.get_details(1).await.unwrap();
        assert_eq!(details.genres[0].name, "Crime");
        assert_eq!(details.cast, vec!["Al Pacino"]);

        let err = provider.get_details(2).await.unwrap_err();
        assert!(matches!(err, MovieEngineError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_failing_genre() {
        let provider = InMemoryProvider::new(vec![movie(1, "Heat", 80, 1.0), movie(2, "Up", 16, 1.0)])
            .with_failing_genre(80);

        assert!(provider.discover_by_genre(80).await.is_err());
        assert_eq!(provider.discover_by_genre(16).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_offline_provider_fails() {
        let provider = InMemoryProvider::offline();
        assert!(!provider.is_available().await);
        assert!(matches!(
            provider.search("x").await.unwrap_err(),
            MovieEngineError::Provider { .. }
        ));
    }
}
