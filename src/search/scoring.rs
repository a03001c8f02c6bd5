//! Product Relevance Scorer
//!
//! A flat additive heuristic with hand-tuned weights. The magnitudes and the
//! branch structure are load-bearing: downstream ordering expectations depend
//! on them, so they must not be rebalanced. The score only orders the
//! candidate pool; membership is decided by the filter in `engine.rs`.

use super::tokenizer::{ParsedQuery, alnum, alnum_x};
use regex::Regex;
use std::sync::LazyLock;

// Rule 1: positional match of the first two query numbers against the first
// two digit runs of the option (or profile name when the option is empty).
const PAIR_EXACT: f64 = 20000.0;
const PAIR_NEAR_BASE: f64 = 12000.0;
const PAIR_NEAR_SLOPE: f64 = 10.0;

// Rule 2: third query number against the last decimal in the option.
const THICKNESS_EXACT: f64 = 15000.0;
const THICKNESS_NEAR_BASE: f64 = 6000.0;
const THICKNESS_NEAR_SLOPE: f64 = 1000.0;
const THICKNESS_TOLERANCE: f64 = 0.01;

// Rule 3: separator-aware whole-query substring.
const WITH_X_OPTION: f64 = 1000.0;
const WITH_X_PROFILE: f64 = 800.0;
const WITH_X_CATEGORY: f64 = 200.0;

// Rule 4: compact whole-query substring.
const COMPACT_OPTION: f64 = 700.0;
const COMPACT_PROFILE: f64 = 600.0;

// Rule 5: per-term plain substring.
const TERM_OPTION: f64 = 40.0;
const TERM_PROFILE: f64 = 30.0;
const TERM_CATEGORY: f64 = 10.0;

static DIGIT_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static DECIMALS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// The text fields of one candidate product; absent links yield empty strings.
#[derive(Debug, Clone, Default)]
pub struct ProductText {
    pub option: String,
    pub profile_name: String,
    pub category_name: String,
}

/// Integers appearing in order in `text`, by digit-run extraction. Runs that
/// overflow are skipped; extraction never fails.
pub fn digit_runs(text: &str) -> Vec<i64> {
    DIGIT_RUNS
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Decimal numbers (integer or fractional) appearing in order in `text`.
pub fn decimal_numbers(text: &str) -> Vec<f64> {
    DECIMALS
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Scores one candidate product against the parsed query. Pure and total:
/// every rule either contributes or is skipped, nothing aborts the ranking.
pub fn score_product(query: &ParsedQuery, text: &ProductText) -> f64 {
    let mut score = 0.0;

    // Rule 1: two-number positional match.
    if query.numbers.len() >= 2 {
        let source = if text.option.is_empty() {
            &text.profile_name
        } else {
            &text.option
        };
        let runs = digit_runs(source);
        if runs.len() >= 2 {
            if runs[0] == query.numbers[0] && runs[1] == query.numbers[1] {
                score += PAIR_EXACT;
            } else if runs[1] == query.numbers[1] {
                let delta = (runs[0] - query.numbers[0]).abs() as f64;
                score += (PAIR_NEAR_BASE - PAIR_NEAR_SLOPE * delta).max(0.0);
            }
        }
    }

    // Rule 2: third-number (thickness) proximity.
    if query.numbers.len() >= 3 {
        if let Some(last) = decimal_numbers(&text.option).last() {
            let target = query.numbers[2] as f64;
            let delta = (last - target).abs();
            if delta <= THICKNESS_TOLERANCE {
                score += THICKNESS_EXACT;
            } else {
                score += (THICKNESS_NEAR_BASE - THICKNESS_NEAR_SLOPE * delta).max(0.0);
            }
        }
    }

    // Rule 3: separator-aware substring bonuses.
    if !query.with_x.is_empty() {
        if alnum_x(&text.option).contains(&query.with_x) {
            score += WITH_X_OPTION;
        }
        if alnum_x(&text.profile_name).contains(&query.with_x) {
            score += WITH_X_PROFILE;
        }
        if alnum_x(&text.category_name).contains(&query.with_x) {
            score += WITH_X_CATEGORY;
        }
    }

    // Rule 4: compact substring bonuses.
    if !query.compact.is_empty() {
        if alnum(&text.option).contains(&query.compact) {
            score += COMPACT_OPTION;
        }
        if alnum(&text.profile_name).contains(&query.compact) {
            score += COMPACT_PROFILE;
        }
    }

    // Rule 5: per-term plain substring bonuses, each independent.
    let option_lower = text.option.to_lowercase();
    let profile_lower = text.profile_name.to_lowercase();
    let category_lower = text.category_name.to_lowercase();
    for term in &query.terms {
        let needle = term.raw.to_lowercase();
        if option_lower.contains(&needle) {
            score += TERM_OPTION;
        }
        if profile_lower.contains(&needle) {
            score += TERM_PROFILE;
        }
        if category_lower.contains(&needle) {
            score += TERM_CATEGORY;
        }
    }

    score
}
