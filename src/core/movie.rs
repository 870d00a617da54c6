use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::nullable_string;

/// Base URL for poster images (w500 rendition)
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// A movie record as returned by search/discover endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieResult {
    /// Provider id
    #[serde(default)]
    pub id: u64,

    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,

    #[serde(default, deserialize_with = "nullable_string")]
    pub overview: String,

    /// Relative poster path (e.g. `/abc.jpg`)
    #[serde(default)]
    pub poster_path: Option<String>,

    /// Release date, `YYYY-MM-DD` or empty
    #[serde(default, deserialize_with = "nullable_string")]
    pub release_date: String,

    /// Average user rating (0.0-10.0)
    #[serde(default)]
    pub vote_average: Option<f64>,

    #[serde(default)]
    pub genre_ids: Vec<u64>,

    #[serde(default)]
    pub popularity: Option<f64>,

    /// Timestamp when this result was fetched
    #[serde(default = "Utc::now")]
    pub fetched_at: DateTime<Utc>,
}

impl MovieResult {
    /// Create a new MovieResult with required fields
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: String::new(),
            poster_path: None,
            release_date: String::new(),
            vote_average: None,
            genre_ids: Vec::new(),
            popularity: None,
            fetched_at: Utc::now(),
        }
    }

    /// Release year parsed from `release_date`
    pub fn year(&self) -> Option<i32> {
        NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d")
            .map(|d| d.year())
            .ok()
            .or_else(|| self.release_date.get(..4).and_then(|y| y.parse().ok()))
    }

    /// Full poster URL, if the record has a poster
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", POSTER_BASE_URL, p))
    }

    /// Get display name (for logging/UI)
    pub fn display_name(&self) -> String {
        match self.year() {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

impl Default for MovieResult {
    fn default() -> Self {
        Self::new(0, "Unknown Movie")
    }
}

/// Movie genre
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// A movie with details and credits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: MovieResult,

    #[serde(default, deserialize_with = "nullable_string")]
    pub tagline: String,

    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<u32>,

    #[serde(default)]
    pub genres: Vec<Genre>,

    /// Top billed cast names
    #[serde(default)]
    pub cast: Vec<String>,

    /// Top crew names
    #[serde(default)]
    pub crew: Vec<String>,
}

impl MovieDetails {
    pub fn new(movie: MovieResult) -> Self {
        Self {
            movie,
            tagline: String::new(),
            runtime: None,
            genres: Vec::new(),
            cast: Vec::new(),
            crew: Vec::new(),
        }
    }
}
