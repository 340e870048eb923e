//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary values (header strings, URLs) from these at the
//! point of use to avoid drift.

/// Cross-encoder model scored against when the caller does not name one.
pub const DEFAULT_MODEL: &str = "Alibaba-NLP/gte-reranker-modernbert-base";

/// `User-Agent` header attached to every outbound scoring request.
pub const USER_AGENT: &str = concat!("crossrank/", env!("CARGO_PKG_VERSION"));

/// Path of the scoring endpoint, joined onto the configured base URL.
pub const SCORE_PATH: &str = "/score";

/// Wire value of the `encoding_format` request field.
pub const ENCODING_FORMAT: &str = "float";

/// Token budget per (query, candidate) pair for the local encoder.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Request timeout applied to the online backend unless overridden.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
