//! Broadcast pairing of queries against candidates.
//!
//! Batch scoring accepts either one query for many candidates or two
//! parallel lists. [`QueryText`] carries that distinction through to the
//! backend (the online wire format is string-or-list), and [`build_pairs`]
//! expands it into the aligned `(query, candidate)` sequence every batch
//! result reports back.

use serde::Serialize;
use thiserror::Error;

/// A query argument for batch scoring: one text, or one per candidate.
///
/// Serializes untagged, so `Single` becomes a JSON string and `Many` a JSON
/// array, matching the shapes the scoring endpoint accepts for `text_1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryText {
    /// One query, broadcast against every candidate.
    Single(String),
    /// One query per candidate, zipped by position.
    Many(Vec<String>),
}

impl QueryText {
    /// Returns the number of queries carried (`None` for a broadcast single).
    pub fn len_if_many(&self) -> Option<usize> {
        match self {
            QueryText::Single(_) => None,
            QueryText::Many(queries) => Some(queries.len()),
        }
    }
}

impl From<&str> for QueryText {
    fn from(text: &str) -> Self {
        QueryText::Single(text.to_string())
    }
}

impl From<String> for QueryText {
    fn from(text: String) -> Self {
        QueryText::Single(text)
    }
}

impl From<Vec<String>> for QueryText {
    fn from(texts: Vec<String>) -> Self {
        QueryText::Many(texts)
    }
}

impl From<&[String]> for QueryText {
    fn from(texts: &[String]) -> Self {
        QueryText::Many(texts.to_vec())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairError {
    #[error("query list length {queries} does not match candidate list length {candidates}")]
    ShapeMismatch { queries: usize, candidates: usize },
}

/// Expands `query` against `candidates` into aligned `(query, candidate)` pairs.
///
/// A `Single` query pairs with every candidate; a `Many` query zips
/// element-wise and must match `candidates` in length.
pub fn build_pairs(
    query: &QueryText,
    candidates: &[String],
) -> Result<Vec<(String, String)>, PairError> {
    match query {
        QueryText::Single(text) => Ok(candidates
            .iter()
            .map(|candidate| (text.clone(), candidate.clone()))
            .collect()),
        QueryText::Many(queries) => {
            if queries.len() != candidates.len() {
                return Err(PairError::ShapeMismatch {
                    queries: queries.len(),
                    candidates: candidates.len(),
                });
            }

            Ok(queries
                .iter()
                .cloned()
                .zip(candidates.iter().cloned())
                .collect())
        }
    }
}
