use std::collections::{BTreeMap, HashMap, HashSet};

use crate::core::{Candidate, ScoredCandidate};
use crate::error::Result;
use crate::ranking::tokenizer::tokenize;
use crate::ranking::{RankOptions, Ranker};

/// Sparse term vector keyed by vocabulary index
type TermVector = BTreeMap<usize, f64>;

/// TF-IDF + cosine similarity re-ranker.
///
/// Every call fits a fresh vocabulary over the candidate titles; nothing is
/// shared between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfidfRanker;

impl TfidfRanker {
    pub fn new() -> Self {
        Self
    }
}

/// Vocabulary and IDF weights fitted over one candidate set
struct Vectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl Vectorizer {
    /// Fit over tokenized documents.
    ///
    /// Uses smoothed IDF `ln((1 + n) / (1 + df)) + 1`. With fewer than two
    /// documents every IDF is 1, i.e. raw term frequency.
    fn fit(documents: &[Vec<String>]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for tokens in documents {
            // iterate in token order so vocabulary indices don't depend on hashing
            let mut seen = HashSet::new();
            for token in tokens {
                if !seen.insert(token.as_str()) {
                    continue;
                }
                let next = vocabulary.len();
                let index = *vocabulary.entry(token.clone()).or_insert(next);
                if index == document_frequency.len() {
                    document_frequency.push(0);
                }
                document_frequency[index] += 1;
            }
        }

        let n = documents.len();
        let idf = if n < 2 {
            vec![1.0; document_frequency.len()]
        } else {
            document_frequency
                .iter()
                .map(|&df| ((1.0 + n as f64) / (1.0 + df as f64)).ln() + 1.0)
                .collect()
        };

        Self { vocabulary, idf }
    }

    /// L2-normalized TF-IDF vector; out-of-vocabulary tokens are ignored
    fn transform(&self, tokens: &[String]) -> TermVector {
        let mut vector = TermVector::new();
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *vector.entry(index).or_insert(0.0) += 1.0;
            }
        }

        for (index, weight) in vector.iter_mut() {
            *weight *= self.idf[*index];
        }

        let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in vector.values_mut() {
                *weight /= norm;
            }
        }
        vector
    }
}

/// Cosine similarity of two L2-normalized vectors, clamped to [0, 1]
fn cosine(a: &TermVector, b: &TermVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(index, w)| large.get(index).map(|v| w * v))
        .sum();
    dot.clamp(0.0, 1.0)
}

impl Ranker for TfidfRanker {
    fn rank(&self, query: &str, candidates: &[Candidate], options: &RankOptions) -> Result<Vec<ScoredCandidate>> {
        let mut seen_pairs = HashSet::new();
        let eligible: Vec<(usize, &Candidate)> = candidates
            .iter()
            .enumerate()
            .filter(|&(_, c)| c.has_title())
            .filter(|&(_, c)| !options.deduplicate || seen_pairs.insert((c.id.as_str(), c.title.as_str())))
            .collect();

        if eligible.is_empty() {
            return Ok(Vec::new());
        }

        let documents: Vec<Vec<String>> = eligible.iter().map(|(_, c)| tokenize(&c.title)).collect();
        let vectorizer = Vectorizer::fit(&documents);
        let query_vector = vectorizer.transform(&tokenize(query));

        let mut scored: Vec<ScoredCandidate> = eligible
            .iter()
            .zip(&documents)
            .map(|((input_index, candidate), tokens)| ScoredCandidate {
                candidate: (*candidate).clone(),
                score: cosine(&query_vector, &vectorizer.transform(tokens)),
                rank: 0,
                input_index: *input_index,
            })
            .collect();

        // stable: ties keep input order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        if let Some(self_id) = options.exclude_id.as_deref() {
            scored.retain(|s| s.candidate.id != self_id);
        }
        if options.exclude_top_match && !scored.is_empty() {
            scored.remove(0);
        }

        scored.truncate(options.top_k);
        for (rank, entry) in scored.iter_mut().enumerate() {
            entry.rank = rank;
        }

        tracing::debug!(
            "tfidf ranked {} of {} candidates (vocabulary {})",
            scored.len(),
            candidates.len(),
            vectorizer.vocabulary.len()
        );

        Ok(scored)
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}

/// Rank candidates with a fresh [`TfidfRanker`]
pub fn rank_titles(query: &str, candidates: &[Candidate], options: &RankOptions) -> Result<Vec<ScoredCandidate>> {
    TfidfRanker::new().rank(query, candidates, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(items: &[(&str, &str)]) -> Vec<Candidate> {
        items.iter().map(|(id, title)| Candidate::new(*id, *title)).collect()
    }

    fn ids(ranked: &[ScoredCandidate]) -> Vec<&str> {
        ranked.iter().map(|s| s.id()).collect()
    }

    fn score_of(ranked: &[ScoredCandidate], id: &str) -> f64 {
        ranked.iter().find(|s| s.id() == id).map(|s| s.score).unwrap()
    }

    #[test]
    fn test_exact_match_then_partial_overlap() {
        let pool = candidates(&[("1", "Inception"), ("2", "Titanic"), ("3", "Inception Day")]);

        let top2 = rank_titles("Inception", &pool, &RankOptions::default().with_top_k(2)).unwrap();
        assert_eq!(ids(&top2), vec!["1", "3"]);

        let all = rank_titles("Inception", &pool, &RankOptions::default()).unwrap();
        assert_eq!(ids(&all), vec!["1", "3", "2"]);
        assert!(score_of(&all, "1") > score_of(&all, "3"));
        assert!(score_of(&all, "3") > score_of(&all, "2"));
        assert!((score_of(&all, "1") - 1.0).abs() < 1e-9);
        assert_eq!(score_of(&all, "2"), 0.0);
    }

    #[test]
    fn test_partial_overlap_uses_smoothed_idf() {
        let pool = candidates(&[("1", "Inception"), ("2", "Titanic"), ("3", "Inception Day")]);
        let ranked = rank_titles("Inception", &pool, &RankOptions::default()).unwrap();

        // idf(inception) = ln(4/3) + 1, idf(day) = ln(4/2) + 1
        let inception = (4.0f64 / 3.0).ln() + 1.0;
        let day = 2.0f64.ln() + 1.0;
        let expected = inception / (inception * inception + day * day).sqrt();
        assert!((score_of(&ranked, "3") - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_query_falls_back_to_input_order() {
        let pool = candidates(&[("1", "A"), ("2", "B"), ("3", "C")]);
        let ranked = rank_titles("", &pool, &RankOptions::default().with_top_k(2)).unwrap();

        assert_eq!(ids(&ranked), vec!["1", "2"]);
        assert!(ranked.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn test_empty_candidates() {
        let ranked = rank_titles("anything", &[], &RankOptions::default()).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_single_candidate_uses_raw_tf() {
        let pool = candidates(&[("1", "Toy Story")]);
        let ranked = rank_titles("story", &pool, &RankOptions::default()).unwrap();

        assert_eq!(ranked.len(), 1);
        let expected = 1.0 / 2.0f64.sqrt();
        assert!((ranked[0].score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_identical_titles_keep_input_order() {
        let pool = candidates(&[("a", "Dune"), ("b", "Dune"), ("c", "Dune")]);
        let ranked = rank_titles("dune", &pool, &RankOptions::default()).unwrap();

        assert_eq!(ids(&ranked), vec!["a", "b", "c"]);
        assert!(ranked.windows(2).all(|w| w[0].score == w[1].score));
    }

    #[test]
    fn test_duplicates_preserved_unless_deduplicated() {
        let pool = candidates(&[("7", "Titanic"), ("8", "Avatar"), ("7", "Titanic")]);

        let ranked = rank_titles("titanic", &pool, &RankOptions::default()).unwrap();
        assert_eq!(ids(&ranked), vec!["7", "7", "8"]);
        assert_eq!(ranked[0].input_index, 0);
        assert_eq!(ranked[1].input_index, 2);

        let deduped = rank_titles("titanic", &pool, &RankOptions::default().deduplicated()).unwrap();
        assert_eq!(ids(&deduped), vec!["7", "8"]);
    }

    #[test]
    fn test_empty_titles_are_excluded() {
        let pool = candidates(&[("1", ""), ("2", "   "), ("3", "Heat")]);
        let ranked = rank_titles("heat", &pool, &RankOptions::default()).unwrap();

        assert_eq!(ids(&ranked), vec!["3"]);
    }

    #[test]
    fn test_exclude_top_match() {
        let pool = candidates(&[
            ("1", "The Dark Knight"),
            ("2", "The Dark Knight Rises"),
            ("3", "Dark Waters"),
            ("4", "Knight and Day"),
        ]);
        let options = RankOptions::default().with_top_k(2).excluding_top_match();
        let ranked = rank_titles("The Dark Knight", &pool, &options).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id(), "2");
        assert_eq!(ranked[0].rank, 0);
        assert_eq!(ranked[1].rank, 1);
        assert!(ranked.iter().all(|s| s.id() != "1"));
    }

    #[test]
    fn test_exclude_self_id() {
        let pool = candidates(&[("1", "Alien"), ("2", "Aliens"), ("3", "Alien Resurrection")]);
        let options = RankOptions::default().excluding_id("1");
        let ranked = rank_titles("Alien", &pool, &options).unwrap();

        assert_eq!(ids(&ranked), vec!["3", "2"]);
    }

    #[test]
    fn test_result_bounds() {
        let pool = candidates(&[("1", "Up"), ("2", "Cars"), ("3", "Coco")]);

        for k in 0..6 {
            let ranked = rank_titles("cars", &pool, &RankOptions::default().with_top_k(k)).unwrap();
            assert_eq!(ranked.len(), k.min(pool.len()));
        }
    }

    #[test]
    fn test_deterministic_ordering() {
        let pool = candidates(&[
            ("1", "Star Wars"),
            ("2", "Star Trek"),
            ("3", "Wars of the Worlds"),
            ("4", "Trek Nation"),
            ("5", "A Star Is Born"),
        ]);
        let options = RankOptions::default();
        let first = rank_titles("star wars trek", &pool, &options).unwrap();

        for _ in 0..10 {
            let again = rank_titles("star wars trek", &pool, &options).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_exact_title_with_disjoint_vocabulary_ranks_first() {
        let pool = candidates(&[("1", "Heat"), ("2", "Vertigo"), ("3", "Psycho"), ("4", "Rope")]);
        let ranked = rank_titles("Psycho", &pool, &RankOptions::default()).unwrap();

        assert_eq!(ranked[0].id(), "3");
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_shared_stop_words_do_not_score() {
        let pool = candidates(&[("1", "Back to the Future"), ("2", "Back to School"), ("3", "Future World")]);
        let ranked = rank_titles("Back to the Future", &pool, &RankOptions::default()).unwrap();

        assert_eq!(ids(&ranked), vec!["1", "3", "2"]);
        assert_eq!(score_of(&ranked, "2"), 0.0);
        assert!(score_of(&ranked, "3") > 0.0);
    }

    #[test]
    fn test_stop_word_query_scores_zero() {
        let pool = candidates(&[("1", "The Thing"), ("2", "It")]);
        let ranked = rank_titles("the", &pool, &RankOptions::default()).unwrap();

        assert_eq!(ids(&ranked), vec!["1", "2"]);
        assert!(ranked.iter().all(|s| s.score == 0.0));
    }
}
