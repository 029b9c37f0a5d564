//! Structural relationships between pairs of markets.
//!
//! - **Complementary**: the two markets' YES outcomes are mutually exclusive
//!   and exhaustive over the same event, so YES probabilities should sum to 1.
//! - **Nested**: resolving the subset market YES implies the superset market
//!   resolves YES. Ordering is significant.
//! - **Temporal**: the same recurring question at two horizons; the earlier
//!   market resolves no later than the later one.
//!
//! A pair may satisfy zero, one, or several kinds; each is evaluated
//! independently.

use serde::Serialize;

use super::ids::MarketId;

/// The kind of structural relationship between two markets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelationKind {
    /// Unordered pair whose YES probabilities are expected to sum to 1.
    Complementary { a: MarketId, b: MarketId },

    /// `subset` YES implies `superset` YES.
    Nested { subset: MarketId, superset: MarketId },

    /// `earlier` resolves no later than `later` on the same question family.
    Temporal { earlier: MarketId, later: MarketId },
}

impl RelationKind {
    /// Returns all market IDs referenced by this relation.
    pub fn market_ids(&self) -> [&MarketId; 2] {
        match self {
            Self::Complementary { a, b } => [a, b],
            Self::Nested { subset, superset } => [subset, superset],
            Self::Temporal { earlier, later } => [earlier, later],
        }
    }

    /// Returns the kind name as a static string.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Complementary { .. } => "complementary",
            Self::Nested { .. } => "nested",
            Self::Temporal { .. } => "temporal",
        }
    }
}
