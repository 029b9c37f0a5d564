//! Detected arbitrage opportunities.
//!
//! An [`Opportunity`] is immutable once constructed and lives only for the
//! duration of one detection pass; each run produces a fresh ranked list.

use rust_decimal::Decimal;
use serde::Serialize;

use super::ids::MarketId;
use super::relation::RelationKind;

/// Risk label for an opportunity.
///
/// The label reflects the relationship type, not a computed risk metric:
/// complementary pairs are LOW, nested and temporal pairs are MEDIUM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
}

/// Which side of a market a step trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TradeSide {
    #[serde(rename = "YES")]
    Yes,
    #[serde(rename = "NO")]
    No,
}

/// One leg of an opportunity. All steps are long (BUY) positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionStep {
    /// Question text of the market this step trades.
    pub market: String,
    pub action: &'static str,
    pub side: TradeSide,
    pub price: Decimal,
}

impl ActionStep {
    /// A BUY step at the given price.
    pub fn buy(market: impl Into<String>, side: TradeSide, price: Decimal) -> Self {
        Self {
            market: market.into(),
            action: "BUY",
            side,
            price,
        }
    }
}

/// A detected arbitrage opportunity across two markets.
#[derive(Debug, Clone, Serialize)]
pub struct Opportunity {
    /// The two markets involved, in check order.
    pub markets: [MarketId; 2],
    /// Questions of the two markets, for human-readable output.
    pub questions: [String; 2],
    pub relationship: RelationKind,
    pub required_capital: Decimal,
    pub transaction_costs: Decimal,
    /// Mispricing edge times position size, before fees.
    pub gross_profit: Decimal,
    /// `gross_profit - transaction_costs`.
    pub net_profit: Decimal,
    pub risk_level: RiskLevel,
    pub action_steps: Vec<ActionStep>,
}
