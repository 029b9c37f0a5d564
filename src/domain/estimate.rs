//! Derived price estimates for market outcomes.
//!
//! These are immutable once computed for a snapshot and serialize with the
//! exact field names the persisted documents use.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

/// Price estimate for one outcome, derived from top-of-book state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomePriceEstimate {
    /// Mid of best bid and best ask, interpreted as a probability.
    pub probability: Decimal,
    /// `probability` rescaled so the per-market sum is 1, when defined.
    pub normalized_probability: Decimal,
    pub best_bid: Decimal,
    pub best_ask: Decimal,
    /// `best_ask - best_bid`; non-negative by construction for any input.
    pub bid_ask_spread: Decimal,
}

/// Per-market pricing: one estimate per outcome plus aggregates.
///
/// The map is keyed by outcome name; for binary markets the keys are always
/// `"Yes"`/`"No"` regardless of source-supplied casing. A `BTreeMap` keeps
/// the serialized document stable across runs.
#[derive(Debug, Clone, Serialize)]
pub struct MarketPricing {
    pub outcome_prices: BTreeMap<String, OutcomePriceEstimate>,
    pub total_implied_probability: Decimal,
    /// `|1 - total_implied_probability|`; how far the book is from 100%.
    pub market_efficiency: Decimal,
    pub average_spread: Decimal,
}

impl MarketPricing {
    /// Estimate for one outcome by name.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&OutcomePriceEstimate> {
        self.outcome_prices.get(name)
    }

    /// Raw YES probability, when the market has a `"Yes"` key.
    #[must_use]
    pub fn yes_probability(&self) -> Option<Decimal> {
        self.outcome("Yes").map(|e| e.probability)
    }

    /// Raw NO probability, when the market has a `"No"` key.
    #[must_use]
    pub fn no_probability(&self) -> Option<Decimal> {
        self.outcome("No").map(|e| e.probability)
    }
}
