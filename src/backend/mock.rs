use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::pairs::{QueryText, build_pairs};

use super::BackendError;
use super::ScoringBackend;

/// Call recorded by [`MockBackend`], one per batch request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBatch {
    pub query: QueryText,
    pub candidates: Vec<String>,
}

/// Scripted backend for tests: canned per-pair scores, a fallback score,
/// and an optional failure to exercise error propagation.
pub struct MockBackend {
    model: String,
    scores: HashMap<(String, String), f64>,
    fallback: f64,
    fail_with: Option<(u16, String)>,
    batches: Mutex<Vec<RecordedBatch>>,
    single_calls: Mutex<usize>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            model: "mock-cross-encoder".to_string(),
            scores: HashMap::new(),
            fallback: 0.5,
            fail_with: None,
            batches: Mutex::new(Vec::new()),
            single_calls: Mutex::new(0),
        }
    }

    /// Cans a score for one (text_1, text_2) pair.
    pub fn with_score(
        mut self,
        text_1: impl Into<String>,
        text_2: impl Into<String>,
        score: f64,
    ) -> Self {
        self.scores.insert((text_1.into(), text_2.into()), score);
        self
    }

    /// Score returned for pairs without a canned entry.
    pub fn with_fallback(mut self, score: f64) -> Self {
        self.fallback = score;
        self
    }

    /// Makes every call fail like a non-2xx scoring response.
    pub fn failing(mut self, status: u16, body: impl Into<String>) -> Self {
        self.fail_with = Some((status, body.into()));
        self
    }

    /// Batch requests observed so far.
    pub fn recorded_batches(&self) -> Vec<RecordedBatch> {
        self.batches.lock().expect("mock lock poisoned").clone()
    }

    /// Number of single-pair requests observed so far.
    pub fn single_call_count(&self) -> usize {
        *self.single_calls.lock().expect("mock lock poisoned")
    }

    fn check_failure(&self) -> Result<(), BackendError> {
        if let Some((status, body)) = &self.fail_with {
            return Err(BackendError::ScoreRequest {
                status: *status,
                body: body.clone(),
            });
        }
        Ok(())
    }

    fn lookup(&self, text_1: &str, text_2: &str) -> f64 {
        self.scores
            .get(&(text_1.to_string(), text_2.to_string()))
            .copied()
            .unwrap_or(self.fallback)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScoringBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn score_one(&self, text_1: &str, text_2: &str) -> Result<f64, BackendError> {
        self.check_failure()?;

        *self.single_calls.lock().expect("mock lock poisoned") += 1;

        Ok(self.lookup(text_1, text_2))
    }

    async fn score_batch(
        &self,
        query: &QueryText,
        candidates: &[String],
    ) -> Result<Vec<f64>, BackendError> {
        self.check_failure()?;

        self.batches
            .lock()
            .expect("mock lock poisoned")
            .push(RecordedBatch {
                query: query.clone(),
                candidates: candidates.to_vec(),
            });

        let pairs = build_pairs(query, candidates)?;

        Ok(pairs
            .iter()
            .map(|(text_1, text_2)| self.lookup(text_1, text_2))
            .collect())
    }
}
