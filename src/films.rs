//! Locally declared short film catalog (`short_films.json`).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MovieEngineError, Result};

/// A short film with poster and video locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortFilm {
    pub title: String,
    /// Poster image URL or path
    #[serde(default)]
    pub poster: String,
    /// Video URL or path
    #[serde(default)]
    pub video: String,
}

impl ShortFilm {
    pub fn new(title: impl Into<String>, poster: impl Into<String>, video: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            poster: poster.into(),
            video: video.into(),
        }
    }
}

/// Ordered list of short films
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ShortFilmCatalog {
    films: Vec<ShortFilm>,
}

impl ShortFilmCatalog {
    pub fn new(films: Vec<ShortFilm>) -> Self {
        Self { films }
    }

    /// Load the catalog from a JSON array file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json_str(&content)?;
        tracing::debug!("Loaded {} short films from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let films: Vec<ShortFilm> = serde_json::from_str(json)?;
        if let Some(index) = films.iter().position(|f| f.title.trim().is_empty()) {
            return Err(MovieEngineError::InvalidInput(format!(
                "short film #{} has an empty title",
                index + 1
            )));
        }
        Ok(Self { films })
    }

    pub fn films(&self) -> &[ShortFilm] {
        &self.films
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    /// 1-based numbered entries, as listed to users
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &ShortFilm)> + '_ {
        self.films.iter().enumerate().map(|(i, f)| (i + 1, f))
    }
}
