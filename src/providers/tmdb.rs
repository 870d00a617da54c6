use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::config::TmdbConfig;
use crate::core::{Genre, MovieDetails, MovieResult};
use crate::error::{MovieEngineError, Result};
use crate::providers::MovieProvider;

const PROVIDER: &str = "tmdb";

/// Number of cast and crew names kept on details
const CREDITS_LIMIT: usize = 5;

/// The Movie Database (TMDB) v3 provider
pub struct TmdbProvider {
    client: Client,
    api_key: String,
    base_url: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct PagedResults {
    #[serde(default)]
    results: Vec<MovieResult>,
}

#[derive(Debug, Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct TmdbDetails {
    #[serde(flatten)]
    movie: MovieResult,
    #[serde(default)]
    tagline: Option<String>,
    #[serde(default)]
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<Genre>,
    #[serde(default)]
    credits: TmdbCredits,
}

#[derive(Debug, Deserialize, Default)]
struct TmdbCredits {
    #[serde(default)]
    cast: Vec<TmdbPerson>,
    #[serde(default)]
    crew: Vec<TmdbPerson>,
}

#[derive(Debug, Deserialize)]
struct TmdbPerson {
    #[serde(default)]
    name: String,
}

impl TmdbProvider {
    /// Create new TMDB provider
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(&TmdbConfig {
            api_key: Some(api_key.into()),
            ..TmdbConfig::default()
        })
    }

    /// Create a provider from config; fails without an API key
    pub fn from_config(config: &TmdbConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> String {
        let mut url = format!(
            "{}{}?api_key={}&language={}",
            self.base_url,
            path,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.language)
        );
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = self.url(path, params);

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| MovieEngineError::provider(PROVIDER, format!("Request to {} failed: {}", path, e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MovieEngineError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(MovieEngineError::provider(PROVIDER, format!("HTTP {} for {}", status, path)));
        }

        response
            .json()
            .await
            .map_err(|e| MovieEngineError::provider(PROVIDER, format!("Invalid JSON from {}: {}", path, e)))
    }

    fn details_to_movie_details(details: TmdbDetails) -> MovieDetails {
        let mut movie = details.movie;
        movie.genre_ids = details.genres.iter().map(|g| g.id).collect();

        MovieDetails {
            movie,
            tagline: details.tagline.unwrap_or_default(),
            runtime: details.runtime,
            genres: details.genres,
            cast: top_names(details.credits.cast),
            crew: top_names(details.credits.crew),
        }
    }
}

fn top_names(people: Vec<TmdbPerson>) -> Vec<String> {
    people
        .into_iter()
        .take(CREDITS_LIMIT)
        .map(|p| p.name)
        .collect()
}

#[async_trait]
impl MovieProvider for TmdbProvider {
    async fn search(&self, query: &str) -> Result<Vec<MovieResult>> {
        let page: PagedResults = self
            .get_json("/search/movie", &[("query", query.to_string())])
            .await?;
        tracing::debug!("tmdb search '{}' returned {} results", query, page.results.len());
        Ok(page.results)
    }

    async fn get_details(&self, id: u64) -> Result<MovieDetails> {
        let details: TmdbDetails = self
            .get_json(&format!("/movie/{}", id), &[("append_to_response", "credits".to_string())])
            .await
            .map_err(|e| match e {
                MovieEngineError::NotFound(_) => MovieEngineError::NotFound(format!("movie {}", id)),
                other => other,
            })?;
        Ok(Self::details_to_movie_details(details))
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        let list: GenreList = self.get_json("/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }

    async fn discover_by_genre(&self, genre_id: u64) -> Result<Vec<MovieResult>> {
        let page: PagedResults = self
            .get_json(
                "/discover/movie",
                &[
                    ("with_genres", genre_id.to_string()),
                    ("sort_by", "popularity.desc".to_string()),
                ],
            )
            .await?;
        Ok(page.results)
    }

    fn name(&self) -> &str {
        PROVIDER
    }

    async fn is_available(&self) -> bool {
        self.genres().await.is_ok()
    }
}
