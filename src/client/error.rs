use thiserror::Error;

use crate::backend::BackendError;
use crate::pairs::PairError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid batch input: {0}")]
    Shape(#[from] PairError),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}
