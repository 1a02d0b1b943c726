//! Marketplace detection from a product page URL.
//!
//! Detection is a plain substring test against a fixed, ordered list of
//! domain fragments. The first fragment found in the URL wins, so the order
//! of [`MARKETPLACES`] is significant.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A marketplace the extension knows how to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    Amazon,
    Walmart,
    Etsy,
    #[serde(rename = "Best Buy")]
    BestBuy,
    Target,
    #[serde(rename = "eBay")]
    Ebay,
    #[default]
    Unknown,
}

/// Domain fragments tested in order against the page URL.
pub const MARKETPLACES: &[(&str, Platform)] = &[
    ("amazon.com", Platform::Amazon),
    ("walmart.com", Platform::Walmart),
    ("etsy.com", Platform::Etsy),
    ("bestbuy.com", Platform::BestBuy),
    ("target.com", Platform::Target),
    ("ebay.com", Platform::Ebay),
];

impl Platform {
    /// Human-facing label, e.g. `"Best Buy"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Platform::Amazon => "Amazon",
            Platform::Walmart => "Walmart",
            Platform::Etsy => "Etsy",
            Platform::BestBuy => "Best Buy",
            Platform::Target => "Target",
            Platform::Ebay => "eBay",
            Platform::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        self != Platform::Unknown
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    /// Parses a marketplace label leniently: case and inner whitespace are
    /// ignored, so `"Best Buy"`, `"bestbuy"` and `"BEST  BUY"` all match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "amazon" => Ok(Platform::Amazon),
            "walmart" => Ok(Platform::Walmart),
            "etsy" => Ok(Platform::Etsy),
            "bestbuy" => Ok(Platform::BestBuy),
            "target" => Ok(Platform::Target),
            "ebay" => Ok(Platform::Ebay),
            "unknown" => Ok(Platform::Unknown),
            _ => Err(CoreError::UnknownPlatform(s.to_owned())),
        }
    }
}

/// Maps a page URL to its marketplace, or [`Platform::Unknown`].
///
/// Matching is ASCII case-insensitive; hostnames are case-insensitive and
/// copied URLs are not always lowercased.
#[must_use]
pub fn detect_platform(url: &str) -> Platform {
    let lower = url.to_ascii_lowercase();
    MARKETPLACES
        .iter()
        .find(|(fragment, _)| lower.contains(fragment))
        .map_or(Platform::Unknown, |&(_, platform)| platform)
}

/// Returns `true` when `url` belongs to a supported marketplace.
#[must_use]
pub fn is_supported(url: &str) -> bool {
    detect_platform(url).is_known()
}
