//! Links into the cart service for "add to cart" on a suggested alternative.

use carbon0_core::Product;
use reqwest::Url;
use serde::Serialize;

use crate::error::PipelineError;
use crate::rank::Alternative;

/// Query parameter carrying the serialized pair.
pub const CART_ITEM_PARAM: &str = "item";

#[derive(Debug, Serialize)]
struct CartItem<'a> {
    alternative: &'a Alternative,
    original: &'a Product,
}

/// Builds a cart URL that hands `{alternative, original}` to the cart
/// service as JSON in the [`CART_ITEM_PARAM`] query parameter.
///
/// Existing query parameters on `endpoint` are preserved.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidUrl`] if `endpoint` does not parse.
pub fn cart_link(
    endpoint: &str,
    alternative: &Alternative,
    original: &Product,
) -> Result<String, PipelineError> {
    let mut url = Url::parse(endpoint).map_err(|e| PipelineError::InvalidUrl {
        url: endpoint.to_owned(),
        reason: e.to_string(),
    })?;

    let payload = serde_json::to_string(&CartItem {
        alternative,
        original,
    })
    .map_err(|e| PipelineError::InvalidUrl {
        url: endpoint.to_owned(),
        reason: format!("could not serialize cart item: {e}"),
    })?;

    url.query_pairs_mut().append_pair(CART_ITEM_PARAM, &payload);
    Ok(url.to_string())
}
