//! Arbitrage detection: relationship plus current probabilities to a
//! costed opportunity.
//!
//! All money math is [`Decimal`]. Every check is fail-soft: a missing price
//! key skips that check and never aborts evaluation of other pairs or
//! kinds. Threshold misses are expected and silent.
//!
//! Nested and temporal edges are expressed buy-only: instead of selling
//! YES on the overpriced market, the first leg buys NO at `1 - yes`. The
//! payoff is identical and the system never needs a short position.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    ActionStep, Market, MarketPricing, Opportunity, RelationKind, RiskLevel, TradeSide,
};

/// Detector configuration, read-only for the lifetime of a run.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectorConfig {
    /// Minimum net profit as a fraction of required capital.
    #[serde(default = "default_min_profit_threshold")]
    pub min_profit_threshold: Decimal,

    /// Fee per leg as a fraction of position size.
    #[serde(default = "default_transaction_fee")]
    pub transaction_fee: Decimal,

    /// Position size per leg in currency units. A normalization constant
    /// for comparable profit figures, not a trading constraint.
    #[serde(default = "default_position_size")]
    pub position_size: Decimal,
}

fn default_min_profit_threshold() -> Decimal {
    Decimal::new(2, 2) // 0.02
}

fn default_transaction_fee() -> Decimal {
    Decimal::new(2, 2) // 0.02
}

fn default_position_size() -> Decimal {
    Decimal::new(100, 0)
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_profit_threshold: default_min_profit_threshold(),
            transaction_fee: default_transaction_fee(),
            position_size: default_position_size(),
        }
    }
}

/// A market together with its pricing for the current snapshot.
#[derive(Debug, Clone)]
pub struct PricedMarket {
    pub market: Market,
    pub pricing: MarketPricing,
}

impl PricedMarket {
    pub fn new(market: Market, pricing: MarketPricing) -> Self {
        Self { market, pricing }
    }
}

/// Run the check for one relationship kind against a priced pair.
///
/// Returns at most one opportunity. `None` means the trigger condition
/// failed, the net profit missed the threshold, or a required price key was
/// absent - none of which is an error.
pub fn check_relation(
    kind: &RelationKind,
    first: &PricedMarket,
    second: &PricedMarket,
    config: &DetectorConfig,
) -> Option<Opportunity> {
    match kind {
        RelationKind::Complementary { .. } => check_complementary(first, second, config),
        RelationKind::Nested { subset, .. } => {
            // Orient the pair so the subset market comes first.
            if subset == first.market.id() {
                check_monotone(kind.clone(), first, second, config)
            } else {
                check_monotone(kind.clone(), second, first, config)
            }
        }
        RelationKind::Temporal { earlier, .. } => {
            if earlier == first.market.id() {
                check_monotone(kind.clone(), first, second, config)
            } else {
                check_monotone(kind.clone(), second, first, config)
            }
        }
    }
}

/// Complementary pair: YES probabilities should sum to 1.
///
/// The YES side is checked first; the NO side only when the YES side
/// produced nothing.
fn check_complementary(
    a: &PricedMarket,
    b: &PricedMarket,
    config: &DetectorConfig,
) -> Option<Opportunity> {
    let kind = RelationKind::Complementary {
        a: a.market.id().clone(),
        b: b.market.id().clone(),
    };

    let a_yes = require_price(a, "Yes")?;
    let b_yes = require_price(b, "Yes")?;

    if a_yes + b_yes < Decimal::ONE {
        let edge = Decimal::ONE - (a_yes + b_yes);
        let steps = vec![
            ActionStep::buy(a.market.question(), TradeSide::Yes, a_yes),
            ActionStep::buy(b.market.question(), TradeSide::Yes, b_yes),
        ];
        if let Some(opp) = build_opportunity(kind.clone(), a, b, edge, RiskLevel::Low, steps, config)
        {
            return Some(opp);
        }
    }

    let a_no = require_price(a, "No")?;
    let b_no = require_price(b, "No")?;

    if a_no + b_no < Decimal::ONE {
        let edge = Decimal::ONE - (a_no + b_no);
        let steps = vec![
            ActionStep::buy(a.market.question(), TradeSide::No, a_no),
            ActionStep::buy(b.market.question(), TradeSide::No, b_no),
        ];
        return build_opportunity(kind, a, b, edge, RiskLevel::Low, steps, config);
    }

    None
}

/// Nested and temporal pairs share one trigger: the first market's YES
/// probability must not exceed the second's, so `yes(first) > yes(second)`
/// is a mispricing with edge `yes(first) - yes(second)`.
fn check_monotone(
    kind: RelationKind,
    first: &PricedMarket,
    second: &PricedMarket,
    config: &DetectorConfig,
) -> Option<Opportunity> {
    let first_yes = require_price(first, "Yes")?;
    let second_yes = require_price(second, "Yes")?;

    if first_yes <= second_yes {
        return None;
    }

    let edge = first_yes - second_yes;
    // Buy-only rendering of the short leg: NO on the overpriced market.
    let steps = vec![
        ActionStep::buy(
            first.market.question(),
            TradeSide::No,
            Decimal::ONE - first_yes,
        ),
        ActionStep::buy(second.market.question(), TradeSide::Yes, second_yes),
    ];

    build_opportunity(kind, first, second, edge, RiskLevel::Medium, steps, config)
}

fn build_opportunity(
    kind: RelationKind,
    first: &PricedMarket,
    second: &PricedMarket,
    edge: Decimal,
    risk_level: RiskLevel,
    action_steps: Vec<ActionStep>,
    config: &DetectorConfig,
) -> Option<Opportunity> {
    let required_capital = config.position_size;
    let transaction_costs = config.position_size * config.transaction_fee * Decimal::TWO;
    let gross_profit = edge * config.position_size;
    let net_profit = gross_profit - transaction_costs;

    if net_profit <= config.min_profit_threshold * required_capital {
        return None;
    }

    Some(Opportunity {
        markets: [first.market.id().clone(), second.market.id().clone()],
        questions: [
            first.market.question().to_string(),
            second.market.question().to_string(),
        ],
        relationship: kind,
        required_capital,
        transaction_costs,
        gross_profit,
        net_profit,
        risk_level,
        action_steps,
    })
}

fn require_price(market: &PricedMarket, key: &str) -> Option<Decimal> {
    let price = market.pricing.outcome(key).map(|e| e.probability);
    if price.is_none() {
        debug!(
            market_id = %market.market.id(),
            key,
            "price key missing, skipping check"
        );
    }
    price
}
