//! Reconciliation of DOM and vision extraction results into a canonical
//! [`carbon0_core::Product`].
//!
//! Precedence, highest first:
//! - `platform`: explicit DOM label, explicit vision label, URL detection.
//! - `name`: DOM `title`, vision `name`.
//! - `seller`: DOM `soldBy`, DOM `seller`, vision `seller`.
//! - `shippingFrom`: DOM `shipsFrom`, vision `shippingFrom`.
//! - everything else: DOM before vision.
//!
//! Empty and whitespace-only strings never win over a later source.

use carbon0_core::{detect_platform, Platform, Product};

use crate::types::{DomExtraction, VisionExtraction};

/// Merges the available extraction results for the page at `page_url`.
///
/// Always yields a product; check [`Product::is_usable`] before sending it
/// anywhere, since neither source may have produced a name.
#[must_use]
pub fn reconcile(
    dom: Option<&DomExtraction>,
    vision: Option<&VisionExtraction>,
    page_url: &str,
) -> Product {
    let platform = explicit_platform(dom.and_then(|d| d.platform.as_deref()))
        .or_else(|| explicit_platform(vision.and_then(|v| v.platform.as_deref())))
        .unwrap_or_else(|| detect_platform(page_url));

    let url = first_present([dom.and_then(|d| d.url.as_deref())])
        .unwrap_or_else(|| page_url.to_owned());

    let mut product = Product::new(platform, url);

    product.name = first_present([
        dom.and_then(|d| d.title.as_deref()),
        vision.and_then(|v| v.name.as_deref()),
    ]);
    product.seller = first_present([
        dom.and_then(|d| d.sold_by.as_deref()),
        dom.and_then(|d| d.seller.as_deref()),
        vision.and_then(|v| v.seller.as_deref()),
    ]);
    product.shipping_from = first_present([
        dom.and_then(|d| d.ships_from.as_deref()),
        vision.and_then(|v| v.shipping_from.as_deref()),
    ]);
    product.shipper = first_present([dom.and_then(|d| d.ships_from.as_deref())]);
    product.fulfilled_by = first_present([dom.and_then(|d| d.fulfilled_by.as_deref())]);

    // Screenshots are never used as the product image; only the DOM has one.
    product.image = first_present([dom.and_then(|d| d.image.as_deref())]);
    product.price = first_present([
        dom.and_then(|d| d.price.as_deref()),
        vision.and_then(|v| v.price.as_deref()),
    ]);
    product.rating = first_present([
        dom.and_then(|d| d.rating.as_deref()),
        vision.and_then(|v| v.rating.as_deref()),
    ]);
    product.brand = first_present([
        dom.and_then(|d| d.brand.as_deref()),
        vision.and_then(|v| v.brand.as_deref()),
    ]);
    product.availability = first_present([
        dom.and_then(|d| d.availability.as_deref()),
        vision.and_then(|v| v.availability.as_deref()),
    ]);
    product.reviews = first_reviews([
        dom.and_then(|d| d.reviews.as_deref()),
        vision.and_then(|v| v.reviews.as_deref()),
    ]);

    tracing::debug!(
        platform = %product.platform,
        usable = product.is_usable(),
        from_dom = dom.is_some(),
        from_vision = vision.is_some(),
        "reconciled product"
    );

    product
}

/// Parses an explicitly supplied marketplace label.
///
/// Blank, unrecognised and `"Unknown"` labels all defer to the next source so
/// that URL detection still gets a say.
fn explicit_platform(label: Option<&str>) -> Option<Platform> {
    let label = label.map(str::trim).filter(|s| !s.is_empty())?;
    match label.parse::<Platform>() {
        Ok(platform) if platform.is_known() => Some(platform),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring explicit platform label");
            None
        }
    }
}

/// First candidate that is non-empty after trimming, as an owned string.
fn first_present<const N: usize>(candidates: [Option<&str>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

/// First non-empty review list, with blank entries dropped.
fn first_reviews<const N: usize>(candidates: [Option<&[String]>; N]) -> Vec<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|reviews| {
            reviews
                .iter()
                .map(|r| r.trim())
                .filter(|r| !r.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .find(|reviews| !reviews.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
