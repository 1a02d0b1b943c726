use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// A product page reconciled from one or more extraction sources, in the
/// shape the scoring backend accepts.
///
/// Only `platform` and `url` are guaranteed; every other field is whatever
/// the extraction sources managed to read off the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub platform: Platform,
    /// Address of the page the product was read from.
    pub url: String,
    /// Image URL or embedded `data:` URI.
    pub image: Option<String>,
    pub name: Option<String>,
    /// Price exactly as displayed, e.g. `"$24.99"`. Never parsed.
    pub price: Option<String>,
    /// Free-form rating text, e.g. `"4.5 out of 5 stars"`.
    pub rating: Option<String>,
    pub seller: Option<String>,
    /// Carrier or warehouse named in the "ships from" line.
    pub shipper: Option<String>,
    pub shipping_from: Option<String>,
    pub fulfilled_by: Option<String>,
    pub brand: Option<String>,
    pub availability: Option<String>,
    #[serde(default)]
    pub reviews: Vec<String>,
}

impl Product {
    /// An empty record for `url`; callers fill in whatever was extracted.
    #[must_use]
    pub fn new(platform: Platform, url: impl Into<String>) -> Self {
        Self {
            platform,
            url: url.into(),
            image: None,
            name: None,
            price: None,
            rating: None,
            seller: None,
            shipper: None,
            shipping_from: None,
            fulfilled_by: None,
            brand: None,
            availability: None,
            reviews: Vec::new(),
        }
    }

    /// A product without a name cannot be scored meaningfully and must not
    /// be sent to the backend.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Product")
    }
}
