use serde::{Deserialize, Serialize};

/// One document in a ranked result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    /// The document text.
    pub document: String,
    /// Relevance score against the query.
    pub score: f64,
    /// Position of the document in the caller's input list.
    pub original_index: usize,
    /// 1-based rank after sorting, assigned over the full batch.
    pub rank: usize,
}

/// Winner of a best-match selection, with the full score vector for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    pub query: String,
    pub best_match: String,
    pub best_score: f64,
    pub best_index: usize,
    pub all_scores: Vec<f64>,
}
