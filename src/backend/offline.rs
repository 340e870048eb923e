//! Locally loaded cross-encoder backend.

use async_trait::async_trait;
use tracing::debug;

use crate::encoder::{CrossEncoder, EncoderConfig};
use crate::pairs::{QueryText, build_pairs};

use super::BackendError;
use super::ScoringBackend;

/// Backend that owns a loaded [`CrossEncoder`] for its lifetime.
///
/// The model is acquired at construction and released when the backend is
/// dropped. One backend serves one caller at a time; wrap it in external
/// synchronization before sharing across tasks.
pub struct OfflineBackend {
    model: String,
    encoder: CrossEncoder,
}

impl std::fmt::Debug for OfflineBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfflineBackend")
            .field("model", &self.model)
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl OfflineBackend {
    /// Loads the cross-encoder for `model` from `config.model_path`.
    ///
    /// Fails at construction when the engine cannot be loaded; a missing
    /// model path is a configuration error here, not at call time.
    pub fn load(model: impl Into<String>, config: EncoderConfig) -> Result<Self, BackendError> {
        if config.model_path.is_none() {
            return Err(BackendError::Initialization {
                reason: "model_path is required for offline scoring".to_string(),
            });
        }

        let encoder = CrossEncoder::load(config).map_err(|e| BackendError::Initialization {
            reason: e.to_string(),
        })?;

        Ok(Self {
            model: model.into(),
            encoder,
        })
    }

    /// Backend over the deterministic stub scorer (no model weights).
    pub fn stub(model: impl Into<String>) -> Result<Self, BackendError> {
        let encoder = CrossEncoder::stub().map_err(|e| BackendError::Initialization {
            reason: e.to_string(),
        })?;

        Ok(Self {
            model: model.into(),
            encoder,
        })
    }

    /// Wraps an already constructed encoder.
    pub fn with_encoder(model: impl Into<String>, encoder: CrossEncoder) -> Self {
        Self {
            model: model.into(),
            encoder,
        }
    }

    pub fn encoder(&self) -> &CrossEncoder {
        &self.encoder
    }
}

#[async_trait]
impl ScoringBackend for OfflineBackend {
    fn name(&self) -> &str {
        "offline"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn score_one(&self, text_1: &str, text_2: &str) -> Result<f64, BackendError> {
        Ok(self.encoder.score(text_1, text_2)?)
    }

    async fn score_batch(
        &self,
        query: &QueryText,
        candidates: &[String],
    ) -> Result<Vec<f64>, BackendError> {
        let pairs = build_pairs(query, candidates)?;

        debug!(
            model = %self.model,
            num_pairs = pairs.len(),
            "Scoring batch with local cross-encoder"
        );

        Ok(self.encoder.score_pairs(&pairs)?)
    }
}
