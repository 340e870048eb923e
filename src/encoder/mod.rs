//! Local cross-encoder inference engine.
//!
//! [`CrossEncoder`] owns the loaded model, tokenizer and compute device for
//! the lifetime of the offline backend. Scoring tokenizes (query, candidate)
//! pairs jointly and reads a single relevance logit per pair off the CLS
//! token; batches run as one rectangular forward pass.
//!
//! With no model path configured the encoder operates in stub mode: a
//! deterministic lexical-overlap score that keeps the rest of the pipeline
//! exercisable without model weights.

pub mod bert;
pub mod config;
pub mod device;
mod error;
mod utils;


pub use config::EncoderConfig;
pub use error::EncoderError;

use std::collections::HashSet;

use candle_core::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use self::bert::BertScorer;
use self::device::select_device;
use self::utils::load_scoring_tokenizer;

pub struct CrossEncoder {
    device: candle_core::Device,
    config: EncoderConfig,
    model_loaded: bool,
    model: Option<BertScorer>,
    tokenizer: Option<Tokenizer>,
}

impl std::fmt::Debug for CrossEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossEncoder")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.model_loaded)
            .finish()
    }
}

impl CrossEncoder {
    pub fn load(config: EncoderConfig) -> Result<Self, EncoderError> {
        if let Err(msg) = config.validate() {
            return Err(EncoderError::InvalidConfig { reason: msg });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for cross-encoder");

        if let Some(ref model_path) = config.model_path {
            if !model_path.exists() {
                return Err(EncoderError::ModelLoadFailed {
                    reason: format!("Model path not found: {}", model_path.display()),
                });
            }

            let config_path = model_path.join("config.json");
            if !config_path.exists() {
                return Err(EncoderError::ModelLoadFailed {
                    reason: format!("Missing config.json in {}", model_path.display()),
                });
            }

            let weights_path = model_path.join("model.safetensors");
            if !weights_path.exists() {
                return Err(EncoderError::ModelLoadFailed {
                    reason: format!("Missing model.safetensors in {}", model_path.display()),
                });
            }

            info!(
                model_path = %model_path.display(),
                max_seq_len = config.max_seq_len,
                "Loading cross-encoder model"
            );

            let model = BertScorer::load(model_path, &device).map_err(|e| {
                EncoderError::ModelLoadFailed {
                    reason: format!("Failed to load BERT model: {}", e),
                }
            })?;

            let tokenizer = load_scoring_tokenizer(model_path, config.max_seq_len)
                .map_err(|e| EncoderError::ModelLoadFailed {
                    reason: format!("Failed to load tokenizer: {}", e),
                })?;

            info!("Cross-encoder model loaded successfully");

            Ok(Self {
                device,
                config,
                model_loaded: true,
                model: Some(model),
                tokenizer: Some(tokenizer),
            })
        } else {
            info!("No cross-encoder model path configured, operating in stub mode");
            Ok(Self {
                device,
                config,
                model_loaded: false,
                model: None,
                tokenizer: None,
            })
        }
    }

    pub fn stub() -> Result<Self, EncoderError> {
        Self::load(EncoderConfig::stub())
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model_loaded
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn device(&self) -> &candle_core::Device {
        &self.device
    }

    /// Scores one (query, candidate) pair.
    pub fn score(&self, query: &str, candidate: &str) -> Result<f64, EncoderError> {
        let pair = (query.to_string(), candidate.to_string());
        let scores = self.score_pairs(std::slice::from_ref(&pair))?;
        Ok(scores[0])
    }

    /// Scores a batch of pairs in one forward pass, preserving input order.
    pub fn score_pairs(&self, pairs: &[(String, String)]) -> Result<Vec<f64>, EncoderError> {
        if pairs.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            num_pairs = pairs.len(),
            model_loaded = self.model_loaded,
            "Scoring pair batch"
        );

        if let (Some(model), Some(tokenizer)) = (&self.model, &self.tokenizer) {
            return self.score_pairs_with_model(model, tokenizer, pairs);
        }

        Ok(pairs
            .iter()
            .map(|(query, candidate)| lexical_score(query, candidate))
            .collect())
    }

    fn score_pairs_with_model(
        &self,
        model: &BertScorer,
        tokenizer: &Tokenizer,
        pairs: &[(String, String)],
    ) -> Result<Vec<f64>, EncoderError> {
        let encodings = tokenizer.encode_batch(pairs.to_vec(), true).map_err(|e| {
            EncoderError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        // Padding-to-longest makes every encoding the same length, so the
        // batch flattens into rectangular tensors.
        let batch = encodings.len();
        let seq_len = encodings[0].get_ids().len();

        let mut ids = Vec::with_capacity(batch * seq_len);
        let mut type_ids = Vec::with_capacity(batch * seq_len);
        let mut mask = Vec::with_capacity(batch * seq_len);
        for encoding in &encodings {
            ids.extend_from_slice(encoding.get_ids());
            type_ids.extend_from_slice(encoding.get_type_ids());
            mask.extend_from_slice(encoding.get_attention_mask());
        }

        let input_ids = Tensor::from_vec(ids, (batch, seq_len), &self.device)?;
        let token_type_ids = Tensor::from_vec(type_ids, (batch, seq_len), &self.device)?;
        let attention_mask = Tensor::from_vec(mask, (batch, seq_len), &self.device)?;

        let logits = model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| EncoderError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let scores = logits.flatten_all()?.to_vec1::<f32>()?;

        Ok(scores.into_iter().map(f64::from).collect())
    }
}

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "to", "of", "in", "for", "on", "with",
    "at", "by", "from", "as", "and", "but", "or", "if", "not", "no", "what", "which", "who",
    "this", "that", "these", "those", "it", "its",
];

fn terms(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Deterministic stand-in score used when no model is loaded.
///
/// Blends term recall with Jaccard overlap, squashed into `[0, 1]` so stub
/// scores sort the same way model logits would for obviously related vs
/// unrelated text.
fn lexical_score(query: &str, candidate: &str) -> f64 {
    let query_terms = terms(query);
    let candidate_terms = terms(candidate);

    if query_terms.is_empty() {
        let len_ratio = (query.len().min(candidate.len()) as f64)
            / (query.len().max(candidate.len()).max(1) as f64);
        return len_ratio * 0.3;
    }

    let overlap = query_terms.intersection(&candidate_terms).count() as f64;
    let recall = overlap / query_terms.len() as f64;

    let union = query_terms.union(&candidate_terms).count() as f64;
    let jaccard = overlap / union;

    let base = 0.6 * recall + 0.4 * jaccard;
    let squashed = 1.0 / (1.0 + (-8.0 * (base - 0.5)).exp());

    squashed.clamp(0.0, 1.0)
}
