use super::*;

const AMAZON_URL: &str = "https://www.amazon.com/dp/B0CARBON";

fn make_dom() -> DomExtraction {
    DomExtraction {
        title: Some("Stainless Steel Water Bottle".to_owned()),
        price: Some("$24.99".to_owned()),
        rating: Some("4.6 out of 5 stars".to_owned()),
        image: Some("https://m.media-amazon.com/images/I/bottle.jpg".to_owned()),
        ..DomExtraction::default()
    }
}

fn make_vision() -> VisionExtraction {
    VisionExtraction {
        name: Some("Water Bottle (vision)".to_owned()),
        price: Some("$25.00".to_owned()),
        rating: Some("4.5".to_owned()),
        seller: Some("Vision Seller".to_owned()),
        shipping_from: Some("Reno, NV".to_owned()),
        reviews: Some(vec!["Keeps water cold".to_owned()]),
        brand: Some("HydroCo".to_owned()),
        availability: Some("In Stock".to_owned()),
        platform: None,
    }
}

// -----------------------------------------------------------------------
// platform / url
// -----------------------------------------------------------------------

#[test]
fn platform_detected_from_url_when_not_supplied() {
    let product = reconcile(Some(&make_dom()), None, "https://www.ebay.com/itm/123");
    assert_eq!(product.platform, Platform::Ebay);
}

#[test]
fn explicit_platform_beats_url_detection() {
    let mut dom = make_dom();
    dom.platform = Some("Walmart".to_owned());
    let product = reconcile(Some(&dom), None, AMAZON_URL);
    assert_eq!(product.platform, Platform::Walmart);
}

#[test]
fn unrecognised_explicit_platform_falls_back_to_url() {
    let mut dom = make_dom();
    dom.platform = Some("Shopify".to_owned());
    let product = reconcile(Some(&dom), None, AMAZON_URL);
    assert_eq!(product.platform, Platform::Amazon);
}

#[test]
fn vision_platform_used_when_dom_has_none() {
    let mut vision = make_vision();
    vision.platform = Some("best buy".to_owned());
    let product = reconcile(None, Some(&vision), "https://example.com/p/1");
    assert_eq!(product.platform, Platform::BestBuy);
}

#[test]
fn platform_unknown_for_unlisted_url() {
    let product = reconcile(None, None, "https://example.com");
    assert_eq!(product.platform, Platform::Unknown);
    assert_eq!(product.url, "https://example.com");
}

#[test]
fn dom_url_beats_page_url() {
    let mut dom = make_dom();
    dom.url = Some("https://www.amazon.com/dp/B0CARBON?th=1".to_owned());
    let product = reconcile(Some(&dom), None, AMAZON_URL);
    assert_eq!(product.url, "https://www.amazon.com/dp/B0CARBON?th=1");
}

#[test]
fn blank_dom_url_falls_back_to_page_url() {
    let mut dom = make_dom();
    dom.url = Some("   ".to_owned());
    let product = reconcile(Some(&dom), None, AMAZON_URL);
    assert_eq!(product.url, AMAZON_URL);
}

// -----------------------------------------------------------------------
// field precedence
// -----------------------------------------------------------------------

#[test]
fn sold_by_preferred_over_seller() {
    let dom = DomExtraction {
        title: Some("Mug".to_owned()),
        sold_by: Some("ACME".to_owned()),
        seller: Some("Other".to_owned()),
        ..DomExtraction::default()
    };
    let product = reconcile(Some(&dom), None, AMAZON_URL);
    assert_eq!(product.seller.as_deref(), Some("ACME"));
}

#[test]
fn dom_seller_used_when_sold_by_blank() {
    let dom = DomExtraction {
        title: Some("Mug".to_owned()),
        sold_by: Some(String::new()),
        seller: Some("Other".to_owned()),
        ..DomExtraction::default()
    };
    let product = reconcile(Some(&dom), Some(&make_vision()), AMAZON_URL);
    assert_eq!(product.seller.as_deref(), Some("Other"));
}

#[test]
fn vision_seller_used_when_dom_has_none() {
    let product = reconcile(Some(&make_dom()), Some(&make_vision()), AMAZON_URL);
    assert_eq!(product.seller.as_deref(), Some("Vision Seller"));
}

#[test]
fn dom_title_beats_vision_name() {
    let product = reconcile(Some(&make_dom()), Some(&make_vision()), AMAZON_URL);
    assert_eq!(product.name.as_deref(), Some("Stainless Steel Water Bottle"));
}

#[test]
fn vision_name_used_when_dom_title_missing() {
    let mut dom = make_dom();
    dom.title = None;
    let product = reconcile(Some(&dom), Some(&make_vision()), AMAZON_URL);
    assert_eq!(product.name.as_deref(), Some("Water Bottle (vision)"));
}

#[test]
fn ships_from_fills_shipping_from_and_shipper() {
    let mut dom = make_dom();
    dom.ships_from = Some("Amazon.com".to_owned());
    dom.fulfilled_by = Some("Amazon".to_owned());
    let product = reconcile(Some(&dom), Some(&make_vision()), AMAZON_URL);
    assert_eq!(product.shipping_from.as_deref(), Some("Amazon.com"));
    assert_eq!(product.shipper.as_deref(), Some("Amazon.com"));
    assert_eq!(product.fulfilled_by.as_deref(), Some("Amazon"));
}

#[test]
fn vision_shipping_from_used_without_dom_ships_from() {
    let product = reconcile(Some(&make_dom()), Some(&make_vision()), AMAZON_URL);
    assert_eq!(product.shipping_from.as_deref(), Some("Reno, NV"));
    assert!(product.shipper.is_none());
}

#[test]
fn dom_fields_beat_vision_fields() {
    let product = reconcile(Some(&make_dom()), Some(&make_vision()), AMAZON_URL);
    assert_eq!(product.price.as_deref(), Some("$24.99"));
    assert_eq!(product.rating.as_deref(), Some("4.6 out of 5 stars"));
}

#[test]
fn vision_only_fields_use_vision_values() {
    let product = reconcile(Some(&make_dom()), Some(&make_vision()), AMAZON_URL);
    assert_eq!(product.brand.as_deref(), Some("HydroCo"));
    assert_eq!(product.availability.as_deref(), Some("In Stock"));
    assert_eq!(product.reviews, vec!["Keeps water cold".to_owned()]);
}

#[test]
fn values_are_trimmed() {
    let mut dom = make_dom();
    dom.title = Some("  Bamboo Brush \n".to_owned());
    let product = reconcile(Some(&dom), None, AMAZON_URL);
    assert_eq!(product.name.as_deref(), Some("Bamboo Brush"));
}

#[test]
fn dom_reviews_beat_vision_reviews() {
    let mut dom = make_dom();
    dom.reviews = Some(vec!["Sturdy".to_owned(), "  ".to_owned()]);
    let product = reconcile(Some(&dom), Some(&make_vision()), AMAZON_URL);
    assert_eq!(product.reviews, vec!["Sturdy".to_owned()]);
}

#[test]
fn blank_dom_reviews_defer_to_vision() {
    let mut dom = make_dom();
    dom.reviews = Some(vec![String::new()]);
    let product = reconcile(Some(&dom), Some(&make_vision()), AMAZON_URL);
    assert_eq!(product.reviews, vec!["Keeps water cold".to_owned()]);
}

// -----------------------------------------------------------------------
// usability
// -----------------------------------------------------------------------

#[test]
fn no_sources_yields_unusable_product() {
    let product = reconcile(None, None, AMAZON_URL);
    assert!(!product.is_usable());
    assert_eq!(product.platform, Platform::Amazon);
    assert!(product.reviews.is_empty());
}

#[test]
fn nameless_sources_yield_unusable_product() {
    let dom = DomExtraction {
        price: Some("$3.00".to_owned()),
        ..DomExtraction::default()
    };
    let mut vision = make_vision();
    vision.name = Some(" ".to_owned());
    let product = reconcile(Some(&dom), Some(&vision), AMAZON_URL);
    assert!(!product.is_usable());
    assert_eq!(product.price.as_deref(), Some("$3.00"));
}

#[test]
fn vision_alone_can_produce_usable_product() {
    let product = reconcile(None, Some(&make_vision()), AMAZON_URL);
    assert!(product.is_usable());
    assert!(product.image.is_none());
}
