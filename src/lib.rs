//! Crossrank library crate: cross-encoder scoring and ranking client.
//!
//! Scores (query, candidate) text pairs for relevance and derives rankings
//! and best-matches from those scores, against either a locally loaded
//! cross-encoder or a remote HTTP scoring service. The execution strategy
//! is chosen once at construction; everything above it is strategy-blind.
//!
//! # Public API Surface
//!
//! ## Core Types (Stable)
//! - [`ScoringClient`], [`ScoringResult`], [`BatchScoringResult`] - pair and batch scoring
//! - [`RankingEngine`], [`RankedItem`], [`BestMatch`] - ranking and best-match selection
//! - [`Config`], [`ConfigError`] - environment-backed client assembly
//!
//! ## Backends
//! - [`ScoringBackend`] - the execution-strategy seam
//! - [`OfflineBackend`] - owns a loaded [`CrossEncoder`]
//! - [`OnlineBackend`], [`OnlineConfig`] - remote `POST /score` client
//!
//! ## Inference
//! - [`CrossEncoder`], [`EncoderConfig`] - local model loading and batched scoring
//!
//! ## Pairing
//! - [`QueryText`], [`build_pairs`] - broadcast pairing of queries against candidates
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod backend;
pub mod client;
pub mod config;
pub mod constants;
pub mod encoder;
pub mod pairs;
pub mod ranking;

#[cfg(any(test, feature = "mock"))]
pub use backend::MockBackend;
pub use backend::{BackendError, OfflineBackend, OnlineBackend, OnlineConfig, ScoringBackend};

pub use client::{BatchScoringResult, ClientError, ScoringClient, ScoringResult};

pub use config::{Config, ConfigError, ScoringMode};

pub use constants::{DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

pub use encoder::{CrossEncoder, EncoderConfig, EncoderError};

pub use pairs::{PairError, QueryText, build_pairs};

pub use ranking::{BestMatch, RankedItem, RankingEngine, RankingError};
