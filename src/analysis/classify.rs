//! Rule-based relationship classification for market pairs.
//!
//! `classify` is a pure, deterministic function of market metadata: no
//! network access and no semantic inference. The rules combine normalized
//! question-text overlap, a fixed antonym table, textual containment, and
//! end-date ordering. When the signal is insufficient the answer is "no
//! relationship" - a false negative only suppresses an arbitrage check,
//! while a false positive risks an invalid profit claim.

use std::collections::BTreeSet;

use crate::domain::{Market, RelationKind};

/// Minimum Jaccard overlap of question tokens for a complementary pair.
const MIN_COMPLEMENTARY_OVERLAP: f64 = 0.5;

/// Words carrying no structural signal, dropped during normalization.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "at", "be", "by", "for", "in", "is", "of", "on", "or", "the", "to",
    "will",
];

/// Antonym pairs that flip a binary question's polarity. A complementary
/// pair must differ exactly by words from this table.
const ANTONYMS: &[(&str, &str)] = &[
    ("win", "lose"),
    ("wins", "loses"),
    ("over", "under"),
    ("above", "below"),
    ("before", "after"),
    ("up", "down"),
    ("pass", "fail"),
    ("higher", "lower"),
    ("more", "fewer"),
    ("more", "less"),
    ("odd", "even"),
];

const MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Classify a market pair against every relationship kind.
///
/// Kinds are evaluated independently and returned in the fixed order
/// Complementary, Nested, Temporal; a pair may match several. Nested is
/// checked in both orientations; Temporal is oriented by end date.
pub fn classify(a: &Market, b: &Market) -> Vec<RelationKind> {
    let mut kinds = Vec::new();

    if are_complementary(a, b) {
        kinds.push(RelationKind::Complementary {
            a: a.id().clone(),
            b: b.id().clone(),
        });
    }

    if is_nested(a, b) {
        kinds.push(RelationKind::Nested {
            subset: a.id().clone(),
            superset: b.id().clone(),
        });
    }
    if is_nested(b, a) {
        kinds.push(RelationKind::Nested {
            subset: b.id().clone(),
            superset: a.id().clone(),
        });
    }

    if are_temporal(a, b) {
        // Orient by end date; ties keep pair order.
        let (earlier, later) = match (a.end_date(), b.end_date()) {
            (Some(da), Some(db)) if db < da => (b, a),
            _ => (a, b),
        };
        kinds.push(RelationKind::Temporal {
            earlier: earlier.id().clone(),
            later: later.id().clone(),
        });
    }

    kinds
}

/// Two binary markets framing the same event with opposite polarity, so
/// their YES outcomes partition the outcome space.
///
/// Requires: both binary, same end date, high token overlap, and a
/// non-empty symmetric difference fully covered by the antonym table.
pub fn are_complementary(a: &Market, b: &Market) -> bool {
    if !a.is_binary() || !b.is_binary() {
        return false;
    }

    match (a.end_date(), b.end_date()) {
        (Some(da), Some(db)) if da == db => {}
        _ => return false,
    }

    let ta = question_tokens(a);
    let tb = question_tokens(b);
    if ta.is_empty() || tb.is_empty() {
        return false;
    }

    let only_a: BTreeSet<&str> = ta.difference(&tb).map(String::as_str).collect();
    let only_b: BTreeSet<&str> = tb.difference(&ta).map(String::as_str).collect();

    // Identical questions describe the same market, not complements.
    if only_a.is_empty() && only_b.is_empty() {
        return false;
    }

    if jaccard(&ta, &tb) < MIN_COMPLEMENTARY_OVERLAP {
        return false;
    }

    antonym_covered(&only_a, &only_b)
}

/// `subset` resolving YES structurally implies `superset` resolving YES.
///
/// Requires the superset question's tokens to be a strict subset of the
/// subset question's (the narrower question carries every broader token
/// plus qualifiers), and `subset.end_date <= superset.end_date`.
pub fn is_nested(subset: &Market, superset: &Market) -> bool {
    let (Some(sub_end), Some(sup_end)) = (subset.end_date(), superset.end_date()) else {
        return false;
    };
    if sub_end > sup_end {
        return false;
    }

    let sub_tokens = question_tokens(subset);
    let sup_tokens = question_tokens(superset);

    !sup_tokens.is_empty()
        && sup_tokens.len() < sub_tokens.len()
        && sup_tokens.is_subset(&sub_tokens)
}

/// The same recurring question at two horizons.
///
/// Requires both end dates, and that after removing date-like tokens the
/// questions are identical while each actually contained date-like tokens
/// that differ between the two. Date-likeness is calendar-shaped only:
/// a bare number ("Will Bitcoin exceed 90000?") is a threshold, not a
/// horizon, and two thresholds on the same quantity are not temporal.
pub fn are_temporal(a: &Market, b: &Market) -> bool {
    if a.end_date().is_none() || b.end_date().is_none() {
        return false;
    }

    let (base_a, dates_a) = split_date_tokens(&token_sequence(a.question()));
    let (base_b, dates_b) = split_date_tokens(&token_sequence(b.question()));

    !base_a.is_empty()
        && base_a == base_b
        && !dates_a.is_empty()
        && !dates_b.is_empty()
        && dates_a != dates_b
}

/// Normalized question tokens: lowercase, alphanumeric-only, stopwords
/// removed.
fn question_tokens(market: &Market) -> BTreeSet<String> {
    tokenize(market.question())
}

fn tokenize(text: &str) -> BTreeSet<String> {
    token_sequence(text).into_iter().collect()
}

/// Normalized tokens in question order; adjacency carries the month/day
/// signal the set form loses.
fn token_sequence(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Every token unique to one side must pair with its antonym on the other.
fn antonym_covered(only_a: &BTreeSet<&str>, only_b: &BTreeSet<&str>) -> bool {
    let paired = |x: &str, y: &str| {
        ANTONYMS
            .iter()
            .any(|(p, q)| (x == *p && y == *q) || (x == *q && y == *p))
    };

    only_a.iter().all(|x| only_b.iter().any(|y| paired(x, y)))
        && only_b.iter().all(|y| only_a.iter().any(|x| paired(x, y)))
}

/// Partition an ordered token sequence into non-date and date-like tokens.
///
/// Date-like: month names, 4-digit years, ordinals like "31st", quarter
/// markers, and day numbers directly adjacent to a month token. A bare
/// number with no calendar context stays in the base set.
fn split_date_tokens(tokens: &[String]) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut base = BTreeSet::new();
    let mut dates = BTreeSet::new();

    let is_month = |i: usize| tokens.get(i).is_some_and(|t| MONTHS.contains(&t.as_str()));

    for (i, token) in tokens.iter().enumerate() {
        let month_adjacent = (i > 0 && is_month(i - 1)) || is_month(i + 1);
        if is_date_token(token) || (is_bare_number(token) && month_adjacent) {
            dates.insert(token.clone());
        } else {
            base.insert(token.clone());
        }
    }

    (base, dates)
}

/// Context-free date-likeness: months, 4-digit years, ordinals, quarters.
fn is_date_token(token: &str) -> bool {
    if MONTHS.contains(&token) {
        return true;
    }
    if token.len() == 4 {
        if let Ok(year) = token.parse::<u32>() {
            if (1900..=2099).contains(&year) {
                return true;
            }
        }
    }
    // Ordinals: digits followed by st/nd/rd/th.
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            if !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()) {
                return true;
            }
        }
    }
    // Quarter markers: q1..q4.
    matches!(token, "q1" | "q2" | "q3" | "q4")
}

fn is_bare_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
