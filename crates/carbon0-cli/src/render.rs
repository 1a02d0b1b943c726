//! Plain-text rendering of a scored product.

use carbon0_core::Product;
use carbon0_pipeline::{cart_link, Ranking, Verdict};

const ALREADY_BEST: &str = "Hooray! This product already has the lowest C0Score among similar \
products. Feel free to still check them out:";
const BETTER_AVAILABLE: &str = "We found some better alternatives! Check them out here:";
const NO_ALTERNATIVES: &str = "No alternatives were found for this product.";

/// Renders the product summary, its score, and the alternatives in slot order.
#[must_use]
pub(crate) fn render_report(product: &Product, ranking: &Ranking, cart_endpoint: &str) -> String {
    let mut lines = vec![
        "Product Description:".to_owned(),
        format!("  {}", product.display_name()),
        format!("  Platform: {}", product.platform),
    ];
    let details = [
        ("Price", &product.price),
        ("Rating", &product.rating),
        ("Sold By", &product.seller),
        ("Ships From", &product.shipping_from),
    ];
    for (label, value) in details {
        if let Some(value) = value {
            lines.push(format!("  {label}: {value}"));
        }
    }

    lines.push(String::new());
    lines.push(format!("Carbon0 Score: {}", format_score(ranking.score)));
    lines.push(
        match ranking.verdict {
            Verdict::AlreadyBest => ALREADY_BEST,
            Verdict::BetterAvailable => BETTER_AVAILABLE,
            Verdict::NoAlternatives => NO_ALTERNATIVES,
        }
        .to_owned(),
    );

    for alt in &ranking.alternatives {
        lines.push(format!(
            "  {}. {} - Carbon0 Score: {}",
            alt.index,
            alt.link,
            format_score(alt.score)
        ));
        if let Some(explanation) = &alt.explanation {
            lines.push(format!("     Pros/Cons: {explanation}"));
        }
        if let Some(image) = &alt.image {
            lines.push(format!("     Image: {image}"));
        }
        match cart_link(cart_endpoint, alt, product) {
            Ok(link) => lines.push(format!("     Add to cart: {link}")),
            Err(e) => tracing::warn!(error = %e, index = alt.index, "skipping cart link"),
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| "unknown".to_owned(), |s| format!("{s}"))
}

#[cfg(test)]
mod tests {
    use carbon0_core::Platform;
    use carbon0_pipeline::Alternative;

    use super::*;

    fn make_product() -> Product {
        let mut product = Product::new(Platform::Walmart, "https://www.walmart.com/ip/1");
        product.name = Some("Cotton Tote".to_owned());
        product.price = Some("$9.97".to_owned());
        product
    }

    fn make_alternative(index: usize, score: Option<f64>) -> Alternative {
        Alternative {
            index,
            link: format!("https://shop.example/{index}"),
            score,
            explanation: Some("Organic cotton".to_owned()),
            image: None,
        }
    }

    #[test]
    fn renders_already_best_message() {
        let ranking = Ranking {
            score: Some(1.0),
            alternatives: vec![make_alternative(1, Some(2.0))],
            already_best: true,
            verdict: Verdict::AlreadyBest,
        };
        let out = render_report(&make_product(), &ranking, "https://cart.example/add");
        assert!(out.contains("Carbon0 Score: 1"), "got: {out}");
        assert!(out.contains("Hooray!"), "got: {out}");
        assert!(out.contains("1. https://shop.example/1 - Carbon0 Score: 2"), "got: {out}");
        assert!(out.contains("Add to cart: https://cart.example/add?item="), "got: {out}");
    }

    #[test]
    fn renders_no_alternatives_distinctly() {
        let ranking = Ranking {
            score: Some(4.5),
            alternatives: vec![],
            already_best: false,
            verdict: Verdict::NoAlternatives,
        };
        let out = render_report(&make_product(), &ranking, "https://cart.example/add");
        assert!(out.contains(NO_ALTERNATIVES), "got: {out}");
        assert!(!out.contains(BETTER_AVAILABLE), "got: {out}");
        assert!(!out.contains(ALREADY_BEST), "got: {out}");
    }

    #[test]
    fn unknown_scores_render_as_unknown() {
        let ranking = Ranking {
            score: None,
            alternatives: vec![make_alternative(3, None)],
            already_best: false,
            verdict: Verdict::BetterAvailable,
        };
        let out = render_report(&make_product(), &ranking, "https://cart.example/add");
        assert!(out.contains("Carbon0 Score: unknown"), "got: {out}");
        assert!(out.contains("3. https://shop.example/3 - Carbon0 Score: unknown"), "got: {out}");
        assert!(out.contains(BETTER_AVAILABLE), "got: {out}");
    }

    #[test]
    fn optional_details_are_omitted() {
        let ranking = Ranking {
            score: Some(2.0),
            alternatives: vec![],
            already_best: false,
            verdict: Verdict::NoAlternatives,
        };
        let out = render_report(&make_product(), &ranking, "https://cart.example/add");
        assert!(out.contains("Price: $9.97"), "got: {out}");
        assert!(!out.contains("Rating:"), "got: {out}");
        assert!(!out.contains("Sold By:"), "got: {out}");
    }

    #[test]
    fn bad_cart_endpoint_skips_cart_line() {
        let ranking = Ranking {
            score: Some(3.0),
            alternatives: vec![make_alternative(1, Some(2.0))],
            already_best: false,
            verdict: Verdict::BetterAvailable,
        };
        let out = render_report(&make_product(), &ranking, "not a url");
        assert!(out.contains("1. https://shop.example/1"), "got: {out}");
        assert!(!out.contains("Add to cart"), "got: {out}");
    }
}
