//! Remote HTTP scoring backend.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants;
use crate::pairs::QueryText;

use super::BackendError;
use super::ScoringBackend;

/// Connection settings for [`OnlineBackend`].
#[derive(Debug, Clone)]
pub struct OnlineConfig {
    /// Base URL of the scoring service (without the `/score` path).
    pub base_url: String,

    /// Model identifier sent with every request.
    pub model: String,

    /// Authentication headers supplied by the caller, attached verbatim.
    pub headers: HashMap<String, String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl OnlineConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            headers: HashMap::new(),
            timeout: Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url is required for online scoring".to_string());
        }

        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }

        Ok(())
    }
}

/// Backend that scores via `POST <base_url>/score`.
///
/// Stateless between calls; a single instance is safe to share across
/// concurrent callers.
pub struct OnlineBackend {
    api_url: String,
    model: String,
    headers: HeaderMap,
    http: HttpClient,
}

impl std::fmt::Debug for OnlineBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnlineBackend")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Serialize)]
pub(crate) struct ScoreRequest<'a> {
    pub model: &'a str,
    pub text_1: &'a QueryText,
    pub text_2: &'a QueryText,
    pub encoding_format: &'static str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreResponse {
    #[serde(default)]
    pub data: Vec<ScoreEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreEntry {
    #[serde(default)]
    pub score: f64,
}

impl OnlineBackend {
    pub fn new(config: OnlineConfig) -> Result<Self, BackendError> {
        if let Err(reason) = config.validate() {
            return Err(BackendError::Initialization { reason });
        }

        let api_url = format!(
            "{}{}",
            config.base_url.trim_end_matches('/'),
            constants::SCORE_PATH
        );

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));
        for (name, value) in &config.headers {
            let name: HeaderName =
                name.parse()
                    .map_err(|_| BackendError::Initialization {
                        reason: format!("invalid header name: {name}"),
                    })?;
            let value: HeaderValue =
                value
                    .parse()
                    .map_err(|_| BackendError::Initialization {
                        reason: format!("invalid value for header {name}"),
                    })?;
            headers.insert(name, value);
        }

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Initialization {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            api_url,
            model: config.model,
            headers,
            http,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn post_score(&self, request: &ScoreRequest<'_>) -> Result<Vec<f64>, BackendError> {
        let response = self
            .http
            .post(&self.api_url)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::ScoreRequest {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ScoreResponse = response.json().await?;
        Ok(parsed.data.into_iter().map(|entry| entry.score).collect())
    }
}

#[async_trait]
impl ScoringBackend for OnlineBackend {
    fn name(&self) -> &str {
        "online"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn score_one(&self, text_1: &str, text_2: &str) -> Result<f64, BackendError> {
        let text_1 = QueryText::Single(text_1.to_string());
        let text_2 = QueryText::Single(text_2.to_string());

        debug!(model = %self.model, url = %self.api_url, "Scoring single pair remotely");

        let scores = self
            .post_score(&ScoreRequest {
                model: &self.model,
                text_1: &text_1,
                text_2: &text_2,
                encoding_format: constants::ENCODING_FORMAT,
            })
            .await?;

        scores
            .first()
            .copied()
            .ok_or_else(|| BackendError::MalformedResponse {
                reason: "empty data array for single-pair request".to_string(),
            })
    }

    async fn score_batch(
        &self,
        query: &QueryText,
        candidates: &[String],
    ) -> Result<Vec<f64>, BackendError> {
        let text_2 = QueryText::Many(candidates.to_vec());

        debug!(
            model = %self.model,
            url = %self.api_url,
            num_candidates = candidates.len(),
            "Scoring batch remotely"
        );

        let scores = self
            .post_score(&ScoreRequest {
                model: &self.model,
                text_1: query,
                text_2: &text_2,
                encoding_format: constants::ENCODING_FORMAT,
            })
            .await?;

        if scores.len() != candidates.len() {
            return Err(BackendError::MalformedResponse {
                reason: format!(
                    "expected {} scores, server returned {}",
                    candidates.len(),
                    scores.len()
                ),
            });
        }

        Ok(scores)
    }
}
