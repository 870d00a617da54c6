//! Engine configuration.
//!
//! Loaded from an optional YAML file, then overridden by environment
//! variables (`TMDB_API_KEY`, `TMDB_BASE_URL`, `TMDB_LANGUAGE`, `PORT`,
//! `SHORT_FILMS_PATH`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MovieEngineError, Result};
use crate::ranking::{RankOptions, DEFAULT_TOP_K};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tmdb: TmdbConfig,
    pub ranking: RankingConfig,
    pub server: ServerConfig,
    /// Path to the short film catalog JSON
    pub short_films_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub top_k: usize,
    /// Skip the best match when recommending (it is usually the queried movie)
    pub exclude_top_match: bool,
    /// Movies shown per genre shelf
    pub genre_shelf_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tmdb: TmdbConfig::default(),
            ranking: RankingConfig::default(),
            server: ServerConfig::default(),
            short_films_path: PathBuf::from("short_films.json"),
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.themoviedb.org/3".to_string(),
            language: "en-US".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            exclude_top_match: true,
            genre_shelf_size: 10,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8090 }
    }
}

impl EngineConfig {
    /// Load config from an optional YAML file plus process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MovieEngineError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply overrides from a variable lookup (the process env in production)
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("TMDB_API_KEY").filter(|k| !k.is_empty()) {
            self.tmdb.api_key = Some(key);
        }
        if let Some(url) = lookup("TMDB_BASE_URL") {
            self.tmdb.base_url = url;
        }
        if let Some(language) = lookup("TMDB_LANGUAGE") {
            self.tmdb.language = language;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(path) = lookup("SHORT_FILMS_PATH") {
            self.short_films_path = PathBuf::from(path);
        }
    }
}

impl TmdbConfig {
    /// API key, or a config error if none (or an empty one) was provided
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| MovieEngineError::Config("TMDB API key not set (TMDB_API_KEY)".to_string()))
    }
}

impl RankingConfig {
    /// Rank options for a recommendation, before per-request overrides
    pub fn rank_options(&self) -> RankOptions {
        RankOptions {
            top_k: self.top_k,
            exclude_top_match: self.exclude_top_match,
            ..RankOptions::default()
        }
    }
}
