//! Ranking and best-match selection over batch scores.
//!
//! [`RankingEngine`] wraps a [`ScoringClient`] and post-processes batch
//! results: a stable descending sort into 1-based ranks, and an argmax with
//! first-occurrence tie-break.

pub mod error;
pub mod types;


pub use error::RankingError;
pub use types::{BestMatch, RankedItem};

use std::cmp::Ordering;

use tracing::debug;

use crate::client::ScoringClient;

pub struct RankingEngine {
    client: ScoringClient,
}

impl std::fmt::Debug for RankingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingEngine")
            .field("client", &self.client)
            .finish()
    }
}

impl RankingEngine {
    pub fn new(client: ScoringClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ScoringClient {
        &self.client
    }

    pub fn into_client(self) -> ScoringClient {
        self.client
    }

    /// Ranks `documents` by relevance to `query`, most relevant first.
    ///
    /// Ties keep the relative order of the input list (the sort is stable),
    /// and ranks 1..N are assigned over the full batch before any
    /// truncation. `top_k` of `Some(k)` keeps the first `k` items;
    /// `Some(0)` behaves like `None` and returns everything.
    pub async fn rank_documents(
        &self,
        query: &str,
        documents: &[String],
        top_k: Option<usize>,
    ) -> Result<Vec<RankedItem>, RankingError> {
        let result = self.client.score_batch(query, documents).await?;

        let mut ranked: Vec<RankedItem> = result
            .scores
            .iter()
            .zip(result.pairs.iter())
            .enumerate()
            .map(|(original_index, (&score, pair))| RankedItem {
                document: pair.1.clone(),
                score,
                original_index,
                rank: 0,
            })
            .collect();

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        for (position, item) in ranked.iter_mut().enumerate() {
            item.rank = position + 1;
        }

        if let Some(k) = top_k
            && k > 0
        {
            ranked.truncate(k);
        }

        debug!(
            num_documents = documents.len(),
            returned = ranked.len(),
            top_score = ranked.first().map(|item| item.score),
            "Ranked documents"
        );

        Ok(ranked)
    }

    /// Selects the best-scoring candidate for `query`.
    ///
    /// Ties for the maximum resolve to the lowest index. The full score
    /// vector is returned alongside the winner.
    pub async fn find_best_match(
        &self,
        query: &str,
        candidates: &[String],
    ) -> Result<BestMatch, RankingError> {
        if candidates.is_empty() {
            return Err(RankingError::EmptyCandidates);
        }

        let result = self.client.score_batch(query, candidates).await?;

        let mut best_index = 0;
        for (index, &score) in result.scores.iter().enumerate() {
            if score > result.scores[best_index] {
                best_index = index;
            }
        }

        let best_score = result.scores[best_index];

        debug!(
            num_candidates = candidates.len(),
            best_index, best_score, "Selected best match"
        );

        Ok(BestMatch {
            query: query.to_string(),
            best_match: candidates[best_index].clone(),
            best_score,
            best_index,
            all_scores: result.scores,
        })
    }
}
