//! Raw shapes produced by the extraction collaborators and the scoring
//! backend.
//!
//! ## DOM extraction (`getProductInfo` content-script reply)
//! Every field is optional. Scrapers emit `""` rather than omitting a field
//! when a selector matches an empty node, so empty strings are treated as
//! absent during reconciliation. Amazon pages populate `soldBy`, `shipsFrom`
//! and `fulfilledBy`; other marketplaces usually only set `seller`.
//!
//! ## Vision extraction
//! The vision model is asked for a flat JSON object. It names the product
//! `name` (not `title`) and the ships-from line `shippingFrom`. A model that
//! cannot read the screenshot may return `null`, which is surfaced as `None`.
//!
//! ## Scoring response
//! `C0Score` and `linkNC0Score` arrive as JSON numbers from the current
//! backend, but older deployments sent them as strings (`"4.2"`) or `null`
//! when no footprint could be computed. Those fields are kept as raw
//! [`serde_json::Value`] and coerced by [`crate::score::parse_score`].
//! `linkN` is `""` for unused slots.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::PipelineError;

/// Number of alternative slots the backend fills.
pub const ALTERNATIVE_SLOTS: usize = 5;

/// Reply from the DOM-scraping content script.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomExtraction {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub sold_by: Option<String>,
    #[serde(default)]
    pub ships_from: Option<String>,
    #[serde(default)]
    pub fulfilled_by: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    /// Marketplace label the content script decided on, e.g. `"Amazon"`.
    #[serde(default)]
    pub platform: Option<String>,
    /// Canonical page URL as seen by the content script.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub reviews: Option<Vec<String>>,
}

impl DomExtraction {
    /// `true` when the scrape read at least one of the headline fields.
    #[must_use]
    pub fn has_any_data(&self) -> bool {
        [&self.title, &self.price, &self.rating, &self.image]
            .into_iter()
            .any(|f| f.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

/// Product fields read from a page screenshot by a vision model.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionExtraction {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub shipping_from: Option<String>,
    #[serde(default)]
    pub reviews: Option<Vec<String>>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    /// Vision replies rarely carry this, but the field is honoured when present.
    #[serde(default)]
    pub platform: Option<String>,
}

/// One `linkN*` group from the scoring response, before coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAlternative {
    pub link: Option<String>,
    pub score: Value,
    pub explanation: Option<String>,
    pub image: Option<String>,
}

/// The scoring backend's reply, with score fields left uncoerced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreResponse {
    pub c0_score: Value,
    pub alternatives: [RawAlternative; ALTERNATIVE_SLOTS],
}

impl ScoreResponse {
    /// Builds a response from a decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MalformedResponse`] if `body` is not a JSON
    /// object. Missing or mistyped fields inside the object are not errors.
    pub fn from_json(body: Value, context: &str) -> Result<Self, PipelineError> {
        let map = match body {
            Value::Object(map) => map,
            other => {
                return Err(PipelineError::MalformedResponse {
                    context: context.to_owned(),
                    reason: format!("expected a JSON object, got {}", json_kind(&other)),
                });
            }
        };

        let alternatives = std::array::from_fn(|i| {
            let n = i + 1;
            RawAlternative {
                link: string_field(&map, &format!("link{n}")),
                score: map
                    .get(&format!("link{n}C0Score"))
                    .cloned()
                    .unwrap_or(Value::Null),
                explanation: string_field(&map, &format!("link{n}Explanation")),
                image: string_field(&map, &format!("link{n}Image")),
            }
        });

        Ok(Self {
            c0_score: map.get("C0Score").cloned().unwrap_or(Value::Null),
            alternatives,
        })
    }
}

/// Reads a non-empty string field; anything else is treated as absent.
fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Some(Value::String(_) | Value::Null) | None => None,
        Some(other) => {
            tracing::debug!(key, kind = json_kind(other), "ignoring non-string field");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
