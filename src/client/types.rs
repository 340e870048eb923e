use serde::{Deserialize, Serialize};

/// Score for one (text_1, text_2) pair.
///
/// `text_1` and `text_2` echo the caller's inputs verbatim, independent of
/// any normalization the backend applies internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub text_1: String,
    pub text_2: String,
    pub score: f64,
}

/// Scores for a batch of pairs, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchScoringResult {
    /// One score per pair.
    pub scores: Vec<f64>,
    /// The (query, candidate) pairs that were scored.
    pub pairs: Vec<(String, String)>,
    /// Arithmetic mean of `scores`; `0.0` for an empty batch.
    pub average_score: f64,
}

impl BatchScoringResult {
    /// Assembles a result, deriving the average from `scores`.
    pub fn new(scores: Vec<f64>, pairs: Vec<(String, String)>) -> Self {
        let average_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        Self {
            scores,
            pairs,
            average_score,
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
