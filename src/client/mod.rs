//! Scoring client over an injected execution backend.
//!
//! [`ScoringClient`] pairs inputs, dispatches through the
//! [`ScoringBackend`](crate::backend::ScoringBackend) chosen at
//! construction, and assembles typed results. It performs no retries;
//! backend failures propagate to the caller unchanged.

pub mod error;
pub mod types;


pub use error::ClientError;
pub use types::{BatchScoringResult, ScoringResult};

use tracing::debug;

use crate::backend::{OfflineBackend, OnlineBackend, OnlineConfig, ScoringBackend};
use crate::encoder::EncoderConfig;
use crate::pairs::{QueryText, build_pairs};

pub struct ScoringClient {
    backend: Box<dyn ScoringBackend>,
}

impl std::fmt::Debug for ScoringClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringClient")
            .field("backend", &self.backend.name())
            .field("model", &self.backend.model())
            .finish()
    }
}

impl ScoringClient {
    /// Client over a locally loaded cross-encoder.
    pub fn offline(model: impl Into<String>, config: EncoderConfig) -> Result<Self, ClientError> {
        let backend = OfflineBackend::load(model, config)?;
        Ok(Self::with_backend(Box::new(backend)))
    }

    /// Client over a remote scoring service.
    pub fn online(config: OnlineConfig) -> Result<Self, ClientError> {
        let backend = OnlineBackend::new(config)?;
        Ok(Self::with_backend(Box::new(backend)))
    }

    /// Client over any backend, chosen by the caller.
    pub fn with_backend(backend: Box<dyn ScoringBackend>) -> Self {
        debug!(
            backend = backend.name(),
            model = backend.model(),
            "Constructed scoring client"
        );

        Self { backend }
    }

    /// Model identifier the underlying backend scores with.
    pub fn model(&self) -> &str {
        self.backend.model()
    }

    /// Name of the underlying execution strategy.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Scores one text pair.
    pub async fn score_pair(
        &self,
        text_1: &str,
        text_2: &str,
    ) -> Result<ScoringResult, ClientError> {
        let score = self.backend.score_one(text_1, text_2).await?;

        Ok(ScoringResult {
            text_1: text_1.to_string(),
            text_2: text_2.to_string(),
            score,
        })
    }

    /// Scores `query` against `candidates` in one backend call.
    ///
    /// A single query broadcasts against every candidate; a query list zips
    /// element-wise and must match `candidates` in length. An empty
    /// candidate list yields an empty result with `average_score == 0.0`
    /// without touching the backend.
    pub async fn score_batch(
        &self,
        query: impl Into<QueryText>,
        candidates: &[String],
    ) -> Result<BatchScoringResult, ClientError> {
        let query = query.into();
        let pairs = build_pairs(&query, candidates)?;

        if pairs.is_empty() {
            return Ok(BatchScoringResult::new(Vec::new(), Vec::new()));
        }

        debug!(
            backend = self.backend.name(),
            num_pairs = pairs.len(),
            "Scoring batch"
        );

        let scores = self.backend.score_batch(&query, candidates).await?;

        Ok(BatchScoringResult::new(scores, pairs))
    }
}
