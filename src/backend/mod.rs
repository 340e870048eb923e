//! Scoring execution backends.
//!
//! [`ScoringBackend`] is the seam between the client and the two execution
//! strategies: [`OfflineBackend`] runs a locally loaded cross-encoder,
//! [`OnlineBackend`] posts to a remote scoring service. The variant is
//! chosen once at construction and injected; nothing upstream branches on
//! mode afterwards.

mod error;
pub mod mock;
pub mod offline;
pub mod online;


pub use error::BackendError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockBackend;
pub use offline::OfflineBackend;
pub use online::{OnlineBackend, OnlineConfig};

use async_trait::async_trait;

use crate::pairs::QueryText;

/// Executes single-pair and batch score requests.
///
/// Implementations preserve input ordering and either score every pair or
/// fail the whole call; partial batches are never returned.
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    /// Identifier of this execution strategy (for diagnostics).
    fn name(&self) -> &str;

    /// Model the backend scores with.
    fn model(&self) -> &str;

    /// Scores one (text_1, text_2) pair.
    async fn score_one(&self, text_1: &str, text_2: &str) -> Result<f64, BackendError>;

    /// Scores `query` against `candidates`, one score per candidate.
    ///
    /// Broadcast resolution (single query vs parallel lists) is the
    /// backend's responsibility; callers validate list lengths up front.
    async fn score_batch(
        &self,
        query: &QueryText,
        candidates: &[String],
    ) -> Result<Vec<f64>, BackendError>;
}

#[async_trait]
impl<T: ScoringBackend + ?Sized> ScoringBackend for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn model(&self) -> &str {
        (**self).model()
    }

    async fn score_one(&self, text_1: &str, text_2: &str) -> Result<f64, BackendError> {
        (**self).score_one(text_1, text_2).await
    }

    async fn score_batch(
        &self,
        query: &QueryText,
        candidates: &[String],
    ) -> Result<Vec<f64>, BackendError> {
        (**self).score_batch(query, candidates).await
    }
}
