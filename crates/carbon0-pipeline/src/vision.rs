//! Screenshot extraction through an OpenAI-compatible vision model.
//!
//! The screenshot is sent inline as a base64 `data:` URL alongside an
//! instruction asking for a flat JSON object. Models wrap that object in
//! prose or code fences often enough that the reply is scanned for the
//! first well-formed `{...}` object rather than parsed directly.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;

use crate::error::PipelineError;
use crate::types::VisionExtraction;

const EXTRACTION_PROMPT: &str = "This is a screenshot of an online store product page. \
Return only a JSON object with these keys, using null for anything not visible: \
name, price, rating, seller, shippingFrom, brand, availability, \
reviews (an array of up to 5 short review texts). \
Copy text exactly as shown; do not convert currencies or units.";

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for a `chat/completions` endpoint that accepts image input.
pub struct VisionClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl VisionClient {
    /// Creates a client for the API rooted at `base_url`
    /// (e.g. `"https://api.openai.com/v1"`).
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Transport`] if the `reqwest::Client` cannot be
    /// built, or [`PipelineError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|u| u.join("chat/completions"))
            .map_err(|e| PipelineError::InvalidUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }

    /// Asks the model to read product fields off `screenshot`.
    ///
    /// Returns `Ok(None)` when the model answers but its reply holds no
    /// usable JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Vision`] when the request fails, the API
    /// answers with a non-2xx status, or the completion envelope is malformed.
    pub async fn extract(
        &self,
        screenshot: &[u8],
    ) -> Result<Option<VisionExtraction>, PipelineError> {
        let body = json!({
            "model": self.model,
            "temperature": 0,
            "max_tokens": 600,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": EXTRACTION_PROMPT },
                    { "type": "image_url", "image_url": { "url": image_data_url(screenshot) } }
                ]
            }]
        });

        tracing::info!(
            endpoint = %self.endpoint,
            model = %self.model,
            bytes = screenshot.len(),
            "requesting screenshot extraction"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::Vision(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Vision(format!(
                "API returned HTTP status {}",
                status.as_u16()
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| PipelineError::Vision(format!("unreadable completion: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| PipelineError::Vision("completion has no message content".into()))?;

        Ok(parse_extraction(&content))
    }
}

/// Pulls a [`VisionExtraction`] out of free-form model output.
#[must_use]
pub fn parse_extraction(content: &str) -> Option<VisionExtraction> {
    let mut last_error = None;
    for (start, _) in content.match_indices('{') {
        let mut stream =
            serde_json::Deserializer::from_str(&content[start..]).into_iter::<VisionExtraction>();
        match stream.next() {
            Some(Ok(extraction)) => return Some(extraction),
            Some(Err(e)) => last_error = Some(e),
            None => {}
        }
    }
    match last_error {
        Some(e) => tracing::warn!(error = %e, "vision reply JSON did not match the expected shape"),
        None => tracing::warn!("vision reply contained no JSON object"),
    }
    None
}

/// Encodes `bytes` as a `data:` URL, sniffing PNG/JPEG/WebP from magic bytes.
#[must_use]
pub fn image_data_url(bytes: &[u8]) -> String {
    let media_type = if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/png"
    };
    format!("data:{media_type};base64,{}", BASE64.encode(bytes))
}
