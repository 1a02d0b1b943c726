//! `analyze` command handler.
//!
//! Runs one linear chain per invocation: extraction inputs → reconciliation
//! → scoring request → score parsing and ranking → rendering. Each step is
//! awaited before the next starts and any failure ends the run; nothing is
//! retried.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use carbon0_core::{is_supported, AppConfig, Product};
use carbon0_pipeline::{
    rank, reconcile, DomExtraction, PipelineError, Ranking, ScoringClient, VisionClient,
};
use serde::Serialize;

use crate::render::render_report;
use crate::AnalyzeArgs;

/// Result of a successful run.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum Outcome {
    /// Stopped before scoring; carries the product that would have been sent.
    DryRun { product: Product },
    Scored { product: Product, ranking: Ranking },
}

/// Extraction inputs gathered before the chain starts.
pub(crate) struct Extraction<'a> {
    pub page_url: &'a str,
    pub dom: Option<DomExtraction>,
    pub screenshot: Option<Vec<u8>>,
}

/// Entry point for `carbon0 analyze`.
///
/// # Errors
///
/// Returns an error if an input file cannot be read, a client cannot be
/// built, or any pipeline step fails. Pipeline failures carry a
/// user-facing message as their outermost context.
pub(crate) async fn run_analyze(config: &AppConfig, args: &AnalyzeArgs) -> anyhow::Result<()> {
    let dom = match args.dom.as_deref() {
        Some(path) => load_dom(path)?,
        None => None,
    };
    let screenshot = match args.screenshot.as_deref() {
        Some(path) => Some(
            std::fs::read(path)
                .with_context(|| format!("failed to read screenshot {}", path.display()))?,
        ),
        None => None,
    };

    let vision = if screenshot.is_some() {
        let api_key = config.vision_api_key.as_deref().context(
            "CARBON0_VISION_API_KEY must be set to analyze a screenshot",
        )?;
        Some(VisionClient::new(
            &config.vision_url,
            api_key,
            &config.vision_model,
            config.request_timeout_secs,
        )?)
    } else {
        None
    };

    let scoring = ScoringClient::new(
        &config.backend_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;

    let extraction = Extraction {
        page_url: &args.url,
        dom,
        screenshot,
    };

    let outcome = match analyze(&extraction, vision.as_ref(), &scoring, args.dry_run).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let message = e.user_message();
            return Err(anyhow::Error::new(e).context(message));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match &outcome {
        Outcome::DryRun { product } => {
            println!("dry-run: would send this product for scoring:");
            println!("{}", serde_json::to_string_pretty(product)?);
        }
        Outcome::Scored { product, ranking } => {
            print!("{}", render_report(product, ranking, &config.cart_url));
        }
    }
    Ok(())
}

/// The extraction → scoring → ranking chain.
///
/// # Errors
///
/// - [`PipelineError::UnsupportedPage`] before any extraction is attempted.
/// - [`PipelineError::Vision`] when screenshot extraction fails and there is
///   no DOM result to fall back on.
/// - [`PipelineError::ExtractionEmpty`] when no source produced a name.
/// - Any error from [`ScoringClient::score_product`].
pub(crate) async fn analyze(
    extraction: &Extraction<'_>,
    vision: Option<&VisionClient>,
    scoring: &ScoringClient,
    dry_run: bool,
) -> Result<Outcome, PipelineError> {
    let page_url = extraction.page_url;
    if !is_supported(page_url) {
        return Err(PipelineError::UnsupportedPage {
            url: page_url.to_owned(),
        });
    }

    let dom = extraction.dom.as_ref().filter(|d| {
        let usable = d.has_any_data();
        if !usable {
            tracing::warn!(page_url, "DOM extraction returned no title, price, rating or image");
        }
        usable
    });

    let vision_result = match (extraction.screenshot.as_deref(), vision) {
        (Some(bytes), Some(client)) => match client.extract(bytes).await {
            Ok(result) => result,
            Err(e) if dom.is_some() => {
                tracing::warn!(error = %e, "vision extraction failed; continuing with DOM data");
                None
            }
            Err(e) => return Err(e),
        },
        _ => None,
    };

    let product = reconcile(dom, vision_result.as_ref(), page_url);
    if !product.is_usable() {
        return Err(PipelineError::ExtractionEmpty {
            url: page_url.to_owned(),
        });
    }

    if dry_run {
        return Ok(Outcome::DryRun { product });
    }

    let response = scoring.score_product(&product).await?;
    let ranking = rank(&response);
    tracing::info!(
        score = ?ranking.score,
        alternatives = ranking.alternatives.len(),
        verdict = ?ranking.verdict,
        "scored product"
    );

    Ok(Outcome::Scored { product, ranking })
}

/// Reads a DOM extraction from `path`, or stdin when `path` is `-`.
///
/// A JSON `null` (the content script did not answer) yields `None`.
fn load_dom(path: &Path) -> anyhow::Result<Option<DomExtraction>> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read DOM extraction from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read DOM extraction {}", path.display()))?
    };
    parse_dom(&raw).with_context(|| format!("invalid DOM extraction JSON in {}", path.display()))
}

fn parse_dom(raw: &str) -> Result<Option<DomExtraction>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<DomExtraction>>(raw)
}
