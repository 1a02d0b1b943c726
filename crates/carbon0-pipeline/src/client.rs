//! HTTP client for the carbon scoring backend.

use std::time::Duration;

use carbon0_core::Product;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::PipelineError;
use crate::types::ScoreResponse;

const PRODUCT_PATH: &str = "api/product";

/// Client for `POST /api/product`.
///
/// One request per call, no retries: a failed call is reported to the
/// caller as either [`PipelineError::Transport`] (nothing came back) or
/// [`PipelineError::BackendRejected`] (a non-2xx status came back).
pub struct ScoringClient {
    client: Client,
    endpoint: Url,
}

impl ScoringClient {
    /// Creates a client for the backend at `base_url`, e.g.
    /// `"http://localhost:5000"`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PipelineError::InvalidUrl`] if `base_url`
    /// is not an absolute http(s) URL.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let endpoint = Self::product_endpoint(base_url)?;
        Ok(Self { client, endpoint })
    }

    /// Full URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Sends `product` for scoring and returns the uncoerced response.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Transport`]: connection, TLS, or timeout failure.
    /// - [`PipelineError::BackendRejected`]: any non-2xx status.
    /// - [`PipelineError::MalformedResponse`]: body is not a JSON object.
    pub async fn score_product(&self, product: &Product) -> Result<ScoreResponse, PipelineError> {
        tracing::info!(
            endpoint = %self.endpoint,
            platform = %product.platform,
            name = product.display_name(),
            "sending product for scoring"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(product)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "scoring backend rejected request");
            return Err(PipelineError::BackendRejected {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let context = format!("POST {}", self.endpoint);
        let body = response.text().await?;
        let parsed = serde_json::from_str::<Value>(&body).map_err(|e| {
            PipelineError::MalformedResponse {
                context: context.clone(),
                reason: e.to_string(),
            }
        })?;

        ScoreResponse::from_json(parsed, &context)
    }

    /// Resolves `api/product` against `base_url`.
    ///
    /// A path on `base_url` is kept, so `"https://host/carbon"` maps to
    /// `"https://host/carbon/api/product"`.
    fn product_endpoint(base_url: &str) -> Result<Url, PipelineError> {
        let invalid = |reason: String| PipelineError::InvalidUrl {
            url: base_url.to_owned(),
            reason,
        };

        // Ensure exactly one trailing slash so `join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme \"{}\"", base.scheme())));
        }
        base.join(PRODUCT_PATH).map_err(|e| invalid(e.to_string()))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
