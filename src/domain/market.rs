//! Market-related domain types.
//!
//! - [`Market`] - A prediction market with N outcomes and listing metadata
//! - [`Outcome`] - A single resolution branch within a market

use chrono::{DateTime, Utc};

use super::ids::{MarketId, OutcomeId};

/// A single outcome within a market.
///
/// Each outcome has a unique ID (used to key order book sides) and a
/// human-readable name. For binary markets, typical names are "Yes"/"No".
/// For multi-outcome markets, names might be candidate names, team names, etc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    id: OutcomeId,
    name: String,
}

impl Outcome {
    /// Create a new outcome.
    pub fn new(id: OutcomeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Get the outcome ID.
    #[must_use]
    pub const fn id(&self) -> &OutcomeId {
        &self.id
    }

    /// Get the name of this outcome.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this outcome is a YES/NO leg of a binary market.
    #[must_use]
    pub fn is_yes_no(&self) -> bool {
        self.name.eq_ignore_ascii_case("yes") || self.name.eq_ignore_ascii_case("no")
    }
}

/// A prediction market as supplied by the listing feed.
///
/// Markets are constructed fresh per fetch cycle; there is no cross-cycle
/// identity beyond the `id`.
#[derive(Debug, Clone)]
pub struct Market {
    id: MarketId,
    question: String,
    description: String,
    outcomes: Vec<Outcome>,
    end_date: Option<DateTime<Utc>>,
    tags: Vec<String>,
    category: Option<String>,
    volume_24h: f64,
    liquidity_score: f64,
}

impl Market {
    /// Create a new market.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: MarketId,
        question: impl Into<String>,
        description: impl Into<String>,
        outcomes: Vec<Outcome>,
        end_date: Option<DateTime<Utc>>,
        tags: Vec<String>,
        category: Option<String>,
        volume_24h: f64,
        liquidity_score: f64,
    ) -> Self {
        Self {
            id,
            question: question.into(),
            description: description.into(),
            outcomes,
            end_date,
            tags,
            category,
            volume_24h,
            liquidity_score,
        }
    }

    /// Get the market ID.
    #[must_use]
    pub const fn id(&self) -> &MarketId {
        &self.id
    }

    /// Get the market question.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Get the market description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get all outcomes.
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Get the market end date, if the feed supplied one.
    #[must_use]
    pub const fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    /// Get the market tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Get the market category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// 24-hour trading volume as reported by the feed.
    #[must_use]
    pub const fn volume_24h(&self) -> f64 {
        self.volume_24h
    }

    /// Liquidity depth as reported by the feed.
    #[must_use]
    pub const fn liquidity_score(&self) -> f64 {
        self.liquidity_score
    }

    /// Check if this is a binary (YES/NO) market.
    ///
    /// A market is binary when it has exactly two outcomes and at least one
    /// is named "yes" or "no", case-insensitively. Everything else takes the
    /// multi-outcome pricing path.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.outcomes.len() == 2 && self.outcomes.iter().any(Outcome::is_yes_no)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: &str, name: &str) -> Outcome {
        Outcome::new(OutcomeId::new(id), name)
    }

    fn market_with_outcomes(outcomes: Vec<Outcome>) -> Market {
        Market::new(
            MarketId::new("m1"),
            "Will it rain tomorrow?",
            "",
            outcomes,
            None,
            vec![],
            None,
            0.0,
            0.0,
        )
    }

    #[test]
    fn binary_with_yes_no_names() {
        let market = market_with_outcomes(vec![outcome("a", "Yes"), outcome("b", "No")]);
        assert!(market.is_binary());
    }

    #[test]
    fn binary_check_is_case_insensitive() {
        let market = market_with_outcomes(vec![outcome("a", "YES"), outcome("b", "no")]);
        assert!(market.is_binary());
    }

    #[test]
    fn two_outcomes_without_yes_no_is_not_binary() {
        let market = market_with_outcomes(vec![outcome("a", "Trump"), outcome("b", "Biden")]);
        assert!(!market.is_binary());
    }

    #[test]
    fn one_yes_no_name_is_enough() {
        let market = market_with_outcomes(vec![outcome("a", "Yes"), outcome("b", "Other")]);
        assert!(market.is_binary());
    }

    #[test]
    fn three_outcomes_is_not_binary() {
        let market = market_with_outcomes(vec![
            outcome("a", "Yes"),
            outcome("b", "No"),
            outcome("c", "Maybe"),
        ]);
        assert!(!market.is_binary());
    }
}
