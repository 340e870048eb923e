use thiserror::Error;

use crate::client::ClientError;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("no candidates provided for best-match selection")]
    EmptyCandidates,

    #[error("scoring failed: {0}")]
    Client(#[from] ClientError),
}
