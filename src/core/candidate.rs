use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MovieEngineError, Result};

/// An item eligible for ranking: opaque id plus display title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    #[serde(default)]
    pub id: String,

    /// Missing or null titles deserialize to the empty string
    #[serde(default, deserialize_with = "crate::core::nullable_string")]
    pub title: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Whether the title carries any non-whitespace text
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Build candidates from an arbitrary JSON payload.
    ///
    /// The payload must be an array. Elements may be objects with `id`/`title`
    /// keys, bare strings (the title, id = position), or anything else, which
    /// is kept as a candidate with an empty title. Only a non-array payload is
    /// rejected.
    pub fn list_from_json(value: &Value) -> Result<Vec<Candidate>> {
        let items = value.as_array().ok_or_else(|| {
            MovieEngineError::InvalidInput(format!(
                "candidates must be a JSON array, got {}",
                json_kind(value)
            ))
        })?;

        Ok(items
            .iter()
            .enumerate()
            .map(|(index, item)| Self::from_json_item(index, item))
            .collect())
    }

    /// Parse a candidate list from JSON text
    pub fn list_from_json_str(json: &str) -> Result<Vec<Candidate>> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| MovieEngineError::InvalidInput(format!("candidates are not valid JSON: {}", e)))?;
        Self::list_from_json(&value)
    }

    fn from_json_item(index: usize, item: &Value) -> Candidate {
        match item {
            Value::Object(map) => {
                let id = match map.get("id") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    _ => index.to_string(),
                };
                let title = match map.get("title") {
                    Some(Value::String(s)) => s.clone(),
                    _ => String::new(),
                };
                Candidate { id, title }
            }
            Value::String(s) => Candidate::new(index.to_string(), s.clone()),
            _ => Candidate::new(index.to_string(), String::new()),
        }
    }
}

/// A candidate with its similarity score and position in the ranked output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,

    /// Cosine similarity in [0, 1]
    pub score: f64,

    /// 0-based position in the returned list
    pub rank: usize,

    /// Position of the candidate in the caller's input
    pub input_index: usize,
}

impl ScoredCandidate {
    pub fn id(&self) -> &str {
        &self.candidate.id
    }

    pub fn title(&self) -> &str {
        &self.candidate.title
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
