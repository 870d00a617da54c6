pub mod candidate;
pub mod movie;
pub mod recommendation;

pub use candidate::{Candidate, ScoredCandidate};
pub use movie::{Genre, MovieDetails, MovieResult};
pub use recommendation::{Recommendation, RecommendationResponse};

use serde::{Deserialize, Deserializer};

/// Deserialize a string that may be null or absent into an empty string
pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
