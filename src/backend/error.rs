use thiserror::Error;

use crate::encoder::EncoderError;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend initialization failed: {reason}")]
    Initialization { reason: String },

    #[error("scoring request failed with status {status}: {body}")]
    ScoreRequest { status: u16, body: String },

    #[error("scoring request transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed scoring response: {reason}")]
    MalformedResponse { reason: String },

    #[error("cross-encoder inference error: {0}")]
    Inference(#[from] EncoderError),

    #[error("invalid pairing: {0}")]
    Pairing(#[from] crate::pairs::PairError),
}

impl BackendError {
    /// Status code of a failed scoring request, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::ScoreRequest { status, .. } => Some(*status),
            _ => None,
        }
    }
}
