//! Coercion of loosely-typed score fields into `f64`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Decimal literal: optional sign, digits with an optional fraction (or a
/// bare fraction), optional exponent. No `inf`/`nan`, no thousands
/// separators, no locale-specific decimal commas.
static DECIMAL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("valid decimal literal regex")
});

/// Coerces a raw score into a number, or `None` when the score is unknown.
///
/// - JSON numbers are returned as-is.
/// - Strings are trimmed and must match the decimal grammar in full; a
///   literal that overflows to infinity counts as unknown.
/// - `null`, booleans, arrays and objects are unknown.
#[must_use]
pub fn parse_score(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_score_str(s),
        _ => None,
    }
}

/// String half of [`parse_score`].
#[must_use]
pub fn parse_score_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if !DECIMAL_LITERAL.is_match(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
