//! Cleanup of raw movie records: fill missing fields, drop duplicates,
//! and summarize ratings and genres.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Placeholder for missing text fields
pub const UNKNOWN: &str = "Unknown";

/// Loosely typed movie record as it arrives from upstream
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl MovieRecord {
    fn key(&self) -> (Option<String>, Option<u64>, Option<String>, Option<String>) {
        (
            self.title.clone(),
            self.rating.map(f64::to_bits),
            self.overview.clone(),
            self.genre.clone(),
        )
    }
}

/// Outcome of [`preprocess`]
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessReport {
    pub records: Vec<MovieRecord>,
    pub missing_filled: usize,
    pub duplicates_removed: usize,
}

/// Replace missing text fields with [`UNKNOWN`]; returns the number of fields filled
pub fn fill_missing(records: &mut [MovieRecord]) -> usize {
    let mut filled = 0;
    for record in records.iter_mut() {
        for field in [&mut record.title, &mut record.overview, &mut record.genre] {
            if field.is_none() {
                *field = Some(UNKNOWN.to_string());
                filled += 1;
            }
        }
    }
    filled
}

/// Drop exact duplicate records, keeping the first occurrence
pub fn drop_duplicates(records: Vec<MovieRecord>) -> Vec<MovieRecord> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert(record.key()) {
            kept.push(record);
        }
    }
    kept
}

/// Fill missing fields, then drop duplicates
pub fn preprocess(mut records: Vec<MovieRecord>) -> PreprocessReport {
    let missing_filled = fill_missing(&mut records);
    let before = records.len();
    let records = drop_duplicates(records);
    let duplicates_removed = before - records.len();

    tracing::debug!(
        "Preprocessed movie records: {} kept, {} fields filled, {} duplicates removed",
        records.len(),
        missing_filled,
        duplicates_removed
    );

    PreprocessReport {
        records,
        missing_filled,
        duplicates_removed,
    }
}

/// Count of records per rating, in ascending numeric rating order
pub fn rating_distribution(records: &[MovieRecord]) -> Vec<(f64, usize)> {
    let mut ratings: Vec<f64> = records.iter().filter_map(|r| r.rating).collect();
    ratings.sort_by(f64::total_cmp);

    let mut counts: Vec<(f64, usize)> = Vec::new();
    for rating in ratings {
        match counts.last_mut() {
            Some((last, count)) if last.total_cmp(&rating).is_eq() => *count += 1,
            _ => counts.push((rating, 1)),
        }
    }
    counts
}

/// Genre counts, most frequent first (ties by name)
pub fn genre_frequency(records: &[MovieRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        let genre = record.genre.as_deref().unwrap_or(UNKNOWN);
        *counts.entry(genre).or_insert(0) += 1;
    }

    let mut frequency: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(genre, count)| (genre.to_string(), count))
        .collect();
    frequency.sort_by(|a, b| b.1.cmp(&a.1));
    frequency
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: Option<&str>, rating: f64, overview: Option<&str>, genre: &str) -> MovieRecord {
        MovieRecord {
            title: title.map(str::to_string),
            rating: Some(rating),
            overview: overview.map(str::to_string),
            genre: Some(genre.to_string()),
        }
    }

    fn sample() -> Vec<MovieRecord> {
        vec![
            record(Some("Inception"), 8.8, Some("A thief steals dreams."), "Sci-Fi"),
            record(Some("Titanic"), 7.9, Some("Ship sinks."), "Romance"),
            record(None, 7.0, None, "Drama"),
            record(Some("Titanic"), 7.9, Some("Ship sinks."), "Romance"),
        ]
    }

    #[test]
    fn test_preprocess_fills_and_dedups() {
        let report = preprocess(sample());

        assert_eq!(report.records.len(), 3);
        assert_eq!(report.missing_filled, 2);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(report.records[2].title.as_deref(), Some(UNKNOWN));
        assert_eq!(report.records[2].overview.as_deref(), Some(UNKNOWN));
    }

    #[test]
    fn test_drop_duplicates_keeps_first() {
        let records = vec![
            record(Some("Heat"), 8.3, None, "Crime"),
            record(Some("Heat"), 8.3, None, "Crime"),
            record(Some("Heat"), 6.0, None, "Crime"),
        ];
        let kept = drop_duplicates(records);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].rating, Some(6.0));
    }

    #[test]
    fn test_rating_distribution() {
        let report = preprocess(sample());
        let distribution = rating_distribution(&report.records);

        assert_eq!(distribution, vec![(7.0, 1), (7.9, 1), (8.8, 1)]);
    }

    #[test]
    fn test_rating_distribution_sorts_numerically() {
        let records = vec![
            record(Some("Perfect"), 10.0, None, "Drama"),
            record(Some("Good"), 7.5, None, "Drama"),
            record(Some("Also Good"), 7.5, None, "Comedy"),
            record(Some("Fine"), 9.0, None, "Drama"),
        ];
        let distribution = rating_distribution(&records);

        assert_eq!(distribution, vec![(7.5, 2), (9.0, 1), (10.0, 1)]);
    }

    #[test]
    fn test_genre_frequency() {
        let frequency = genre_frequency(&sample());
        assert_eq!(frequency[0], ("Romance".to_string(), 2));
        assert_eq!(frequency.len(), 3);
        // ties in name order
        assert_eq!(frequency[1].0, "Drama");
        assert_eq!(frequency[2].0, "Sci-Fi");
    }
}
