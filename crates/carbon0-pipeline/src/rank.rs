//! Turns a scoring response into the alternatives shown to the user.
//!
//! Alternatives keep the backend's slot order (1 through 5). They are not
//! re-sorted by score: the backend already ranks them, and the slot number is
//! what the cart and the explanation toggles refer to.

use serde::Serialize;

use crate::score::parse_score;
use crate::types::ScoreResponse;

/// A suggested replacement product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    /// 1-based backend slot.
    pub index: usize,
    pub link: String,
    /// Carbon score, or `None` when the backend could not compute one.
    pub score: Option<f64>,
    pub explanation: Option<String>,
    pub image: Option<String>,
}

/// How the scored product compares with its alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No slot carried a link.
    NoAlternatives,
    /// Alternatives exist and the product's score beats every known slot
    /// score.
    AlreadyBest,
    /// Alternatives exist and the product is not known to beat them all.
    BetterAvailable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub score: Option<f64>,
    pub alternatives: Vec<Alternative>,
    /// Computed from all five slot scores, linked or not.
    pub already_best: bool,
    pub verdict: Verdict,
}

impl Ranking {
    #[must_use]
    pub fn is_already_best(&self) -> bool {
        self.already_best
    }
}

/// Parses every score in `response` and ranks the alternatives.
#[must_use]
pub fn rank(response: &ScoreResponse) -> Ranking {
    let score = parse_score(&response.c0_score);

    let alternatives: Vec<Alternative> = response
        .alternatives
        .iter()
        .enumerate()
        .filter_map(|(i, raw)| {
            let link = raw.link.clone().filter(|l| !l.trim().is_empty())?;
            Some(Alternative {
                index: i + 1,
                link,
                score: parse_score(&raw.score),
                explanation: raw.explanation.clone(),
                image: raw.image.clone(),
            })
        })
        .collect();

    let already_best = is_already_best(
        score,
        response.alternatives.iter().map(|raw| parse_score(&raw.score)),
    );
    let verdict = verdict(already_best, &alternatives);
    tracing::debug!(
        ?score,
        alternatives = alternatives.len(),
        already_best,
        ?verdict,
        "ranked alternatives"
    );

    Ranking {
        score,
        alternatives,
        already_best,
        verdict,
    }
}

/// Picks the verdict shown for the retained alternatives.
#[must_use]
pub fn verdict(already_best: bool, alternatives: &[Alternative]) -> Verdict {
    if alternatives.is_empty() {
        Verdict::NoAlternatives
    } else if already_best {
        Verdict::AlreadyBest
    } else {
        Verdict::BetterAvailable
    }
}

/// `true` iff `score` is known, at least one alternative score is known, and
/// `score` is strictly lower than every known alternative score. Unknown
/// alternative scores are ignored.
#[must_use]
pub fn is_already_best<I>(score: Option<f64>, alternative_scores: I) -> bool
where
    I: IntoIterator<Item = Option<f64>>,
{
    let Some(score) = score else {
        return false;
    };
    let mut any_known = false;
    for alt in alternative_scores.into_iter().flatten() {
        any_known = true;
        if score >= alt {
            return false;
        }
    }
    any_known
}
