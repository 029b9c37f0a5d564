//! Pairwise opportunity scan and ranking.

use tracing::info;

use crate::domain::Opportunity;

use super::classify::classify;
use super::detector::{check_relation, DetectorConfig, PricedMarket};

/// Scan a market set for arbitrage opportunities and rank the result.
///
/// Pairs are enumerated upper-triangular (`(i, j)` for `i < j` over the
/// input order) and each pair is tested against every matching relationship
/// kind in the classifier's fixed order. The fixed order only affects
/// tie-break ordering in the ranked output. Infallible: the result may be
/// empty but the scan never raises out of a run.
pub fn find_opportunities(markets: &[PricedMarket], config: &DetectorConfig) -> Vec<Opportunity> {
    let mut opportunities = Vec::new();

    for (i, first) in markets.iter().enumerate() {
        for second in &markets[i + 1..] {
            for kind in classify(&first.market, &second.market) {
                if let Some(opp) = check_relation(&kind, first, second, config) {
                    opportunities.push(opp);
                }
            }
        }
    }

    info!(
        markets = markets.len(),
        opportunities = opportunities.len(),
        "opportunity scan complete"
    );

    rank(opportunities)
}

/// Sort opportunities by net profit, highest first.
///
/// The sort is stable, so equal profits keep their discovery order.
#[must_use]
pub fn rank(mut opportunities: Vec<Opportunity>) -> Vec<Opportunity> {
    opportunities.sort_by(|a, b| b.net_profit.cmp(&a.net_profit));
    opportunities
}
