//! Order book pricing: raw bid/ask state to outcome probability estimates.
//!
//! Free functions over the domain types; no pricer state is needed. Two
//! paths exist:
//!
//! - **Binary** markets price the YES outcome off the market-level book and
//!   construct NO as its exact complement, so the pair is tautologically
//!   normalized (`total_implied_probability` is 1 and `market_efficiency`
//!   is 0 by construction).
//! - **Multi-outcome** markets price each outcome off its own book sides and
//!   rescale the raw mids so normalized probabilities sum to 1 when the raw
//!   sum is positive.
//!
//! Everything here is fail-soft: malformed price strings parse to zero,
//! empty sides take conservative defaults (bid 0, ask 1), and a failed book
//! fetch maps to [`failed_market_pricing`]. Callers always receive a
//! complete estimate map, never a partial one or an error.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{BookSnapshot, Market, MarketPricing, Outcome, OutcomePriceEstimate};

const TWO: Decimal = Decimal::TWO;

/// Parse a raw price string into a probability.
///
/// Malformed input yields `0` rather than an error so a single bad quote
/// does not abort the whole market.
#[must_use]
pub fn parse_price(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

/// Price a market from its order book snapshot.
///
/// Dispatches to the binary or multi-outcome path based on the outcome set.
#[must_use]
pub fn price_market(market: &Market, book: &BookSnapshot) -> MarketPricing {
    if market.is_binary() {
        price_binary(book)
    } else {
        price_multi_outcome(market.outcomes(), book)
    }
}

/// Conservative worst-case pricing for a market whose book could not be
/// fetched or priced: every outcome gets probability 0, bid 0, ask 1,
/// spread 1; the aggregate reads as maximally inefficient.
#[must_use]
pub fn failed_market_pricing(market: &Market) -> MarketPricing {
    // Binary estimates always carry the fixed "Yes"/"No" key pair, exactly
    // as the success path emits them, regardless of the source-supplied
    // outcome names.
    let outcome_prices: BTreeMap<String, OutcomePriceEstimate> = if market.is_binary() {
        [
            ("Yes".to_string(), worst_case_estimate()),
            ("No".to_string(), worst_case_estimate()),
        ]
        .into_iter()
        .collect()
    } else {
        market
            .outcomes()
            .iter()
            .map(|o| (o.name().to_string(), worst_case_estimate()))
            .collect()
    };

    MarketPricing {
        outcome_prices,
        total_implied_probability: Decimal::ZERO,
        market_efficiency: Decimal::ONE,
        average_spread: Decimal::ONE,
    }
}

fn price_binary(book: &BookSnapshot) -> MarketPricing {
    // Empty sides default to the worst case for a buyer: bid 0, ask 1.
    let yes_bid = book.best_bid().map(parse_price).unwrap_or(Decimal::ZERO);
    let yes_ask = book.best_ask().map(parse_price).unwrap_or(Decimal::ONE);

    let yes_mid = (yes_bid + yes_ask) / TWO;
    let spread = clamped_spread(yes_bid, yes_ask);

    let mut outcome_prices = BTreeMap::new();
    outcome_prices.insert(
        "Yes".to_string(),
        OutcomePriceEstimate {
            probability: yes_mid,
            normalized_probability: yes_mid,
            best_bid: yes_bid,
            best_ask: yes_ask,
            bid_ask_spread: spread,
        },
    );
    // NO is the exact complement of YES, with bid and ask mirrored.
    outcome_prices.insert(
        "No".to_string(),
        OutcomePriceEstimate {
            probability: Decimal::ONE - yes_mid,
            normalized_probability: Decimal::ONE - yes_mid,
            best_bid: Decimal::ONE - yes_ask,
            best_ask: Decimal::ONE - yes_bid,
            bid_ask_spread: spread,
        },
    );

    MarketPricing {
        outcome_prices,
        total_implied_probability: Decimal::ONE,
        market_efficiency: Decimal::ZERO,
        average_spread: spread,
    }
}

fn price_multi_outcome(outcomes: &[Outcome], book: &BookSnapshot) -> MarketPricing {
    if outcomes.is_empty() {
        return MarketPricing {
            outcome_prices: BTreeMap::new(),
            total_implied_probability: Decimal::ZERO,
            market_efficiency: Decimal::ONE,
            average_spread: Decimal::ONE,
        };
    }

    let mut outcome_prices = BTreeMap::new();
    let mut total_implied = Decimal::ZERO;
    let mut spread_sum = Decimal::ZERO;

    for outcome in outcomes {
        let best_bid = book
            .bids_for(outcome.id())
            .first()
            .map(|l| parse_price(l.price()))
            .unwrap_or(Decimal::ZERO);
        let best_ask = book
            .asks_for(outcome.id())
            .first()
            .map(|l| parse_price(l.price()))
            .unwrap_or(Decimal::ONE);

        let mid = (best_bid + best_ask) / TWO;
        let spread = clamped_spread(best_bid, best_ask);

        total_implied += mid;
        spread_sum += spread;

        outcome_prices.insert(
            outcome.name().to_string(),
            OutcomePriceEstimate {
                probability: mid,
                normalized_probability: Decimal::ZERO,
                best_bid,
                best_ask,
                bid_ask_spread: spread,
            },
        );
    }

    // Rescale so normalized probabilities sum to 1. A non-positive sum
    // leaves them at zero; dividing by it would be meaningless.
    if total_implied > Decimal::ZERO {
        for estimate in outcome_prices.values_mut() {
            estimate.normalized_probability = estimate.probability / total_implied;
        }
    }

    let count = Decimal::from(outcomes.len());

    MarketPricing {
        outcome_prices,
        total_implied_probability: total_implied,
        market_efficiency: (Decimal::ONE - total_implied).abs(),
        average_spread: spread_sum / count,
    }
}

/// `best_ask - best_bid`, floored at zero so crossed or malformed books
/// never report a negative spread.
fn clamped_spread(bid: Decimal, ask: Decimal) -> Decimal {
    (ask - bid).max(Decimal::ZERO)
}

fn worst_case_estimate() -> OutcomePriceEstimate {
    OutcomePriceEstimate {
        probability: Decimal::ZERO,
        normalized_probability: Decimal::ZERO,
        best_bid: Decimal::ZERO,
        best_ask: Decimal::ONE,
        bid_ask_spread: Decimal::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketId, OutcomeId, RawLevel};
    use rust_decimal_macros::dec;

    fn binary_market() -> Market {
        Market::new(
            MarketId::new("m-binary"),
            "Will X happen?",
            "",
            vec![
                Outcome::new(OutcomeId::new("t-yes"), "Yes"),
                Outcome::new(OutcomeId::new("t-no"), "No"),
            ],
            None,
            vec![],
            None,
            0.0,
            0.0,
        )
    }

    fn multi_market(names: &[&str]) -> Market {
        let outcomes = names
            .iter()
            .enumerate()
            .map(|(i, name)| Outcome::new(OutcomeId::new(format!("o{i}")), *name))
            .collect();
        Market::new(
            MarketId::new("m-multi"),
            "Who wins?",
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
    fn parse_price_accepts_decimal_strings() {
        assert_eq!(parse_price("0.45"), dec!(0.45));
        assert_eq!(parse_price(" 0.5 "), dec!(0.5));
    }

    #[test]
    fn parse_price_maps_garbage_to_zero() {
        assert_eq!(parse_price("not-a-price"), Decimal::ZERO);
        assert_eq!(parse_price(""), Decimal::ZERO);
    }

    #[test]
    fn binary_yes_is_mid_and_no_is_complement() {
        let market = binary_market();
        let mut book = BookSnapshot::new();
        book.insert_side("bids", vec![RawLevel::new("0.40", "100")]);
        book.insert_side("asks", vec![RawLevel::new("0.50", "100")]);

        let pricing = price_market(&market, &book);

        let yes = pricing.outcome("Yes").unwrap();
        let no = pricing.outcome("No").unwrap();

        assert_eq!(yes.probability, dec!(0.45));
        assert_eq!(yes.best_bid, dec!(0.40));
        assert_eq!(yes.best_ask, dec!(0.50));
        assert_eq!(no.probability, dec!(0.55));
        assert_eq!(no.best_bid, dec!(0.50));
        assert_eq!(no.best_ask, dec!(0.60));

        // Tautologically normalized, by construction.
        assert_eq!(yes.probability + no.probability, Decimal::ONE);
        assert_eq!(pricing.total_implied_probability, Decimal::ONE);
        assert_eq!(pricing.market_efficiency, Decimal::ZERO);
        assert_eq!(pricing.average_spread, dec!(0.10));
    }

    #[test]
    fn binary_empty_sides_default_to_worst_case() {
        let market = binary_market();
        let book = BookSnapshot::new();

        let pricing = price_market(&market, &book);
        let yes = pricing.outcome("Yes").unwrap();

        assert_eq!(yes.best_bid, Decimal::ZERO);
        assert_eq!(yes.best_ask, Decimal::ONE);
        assert_eq!(yes.probability, dec!(0.5));
        assert_eq!(yes.bid_ask_spread, Decimal::ONE);
    }

    #[test]
    fn binary_keys_are_canonical_regardless_of_source_casing() {
        let market = Market::new(
            MarketId::new("m"),
            "q",
            "",
            vec![
                Outcome::new(OutcomeId::new("a"), "YES"),
                Outcome::new(OutcomeId::new("b"), "no"),
            ],
            None,
            vec![],
            None,
            0.0,
            0.0,
        );

        let pricing = price_market(&market, &BookSnapshot::new());
        assert!(pricing.outcome("Yes").is_some());
        assert!(pricing.outcome("No").is_some());
        assert_eq!(pricing.outcome_prices.len(), 2);
    }

    #[test]
    fn multi_outcome_mids_and_normalization() {
        let market = multi_market(&["Alice", "Bob", "Carol"]);
        let mut book = BookSnapshot::new();
        book.insert_side("bids_o0", vec![RawLevel::new("0.50", "10")]);
        book.insert_side("asks_o0", vec![RawLevel::new("0.60", "10")]);
        book.insert_side("bids_o1", vec![RawLevel::new("0.20", "10")]);
        book.insert_side("asks_o1", vec![RawLevel::new("0.30", "10")]);
        book.insert_side("bids_o2", vec![RawLevel::new("0.10", "10")]);
        book.insert_side("asks_o2", vec![RawLevel::new("0.20", "10")]);

        let pricing = price_market(&market, &book);

        assert_eq!(pricing.outcome("Alice").unwrap().probability, dec!(0.55));
        assert_eq!(pricing.outcome("Bob").unwrap().probability, dec!(0.25));
        assert_eq!(pricing.outcome("Carol").unwrap().probability, dec!(0.15));
        assert_eq!(pricing.total_implied_probability, dec!(0.95));
        assert_eq!(pricing.market_efficiency, dec!(0.05));
        assert_eq!(pricing.average_spread, dec!(0.10));

        let normalized_sum: Decimal = pricing
            .outcome_prices
            .values()
            .map(|e| e.normalized_probability)
            .sum();
        assert!((normalized_sum - Decimal::ONE).abs() < dec!(0.0000001));
    }

    #[test]
    fn multi_outcome_missing_sides_default_per_outcome() {
        let market = multi_market(&["Alice", "Bob"]);
        let mut book = BookSnapshot::new();
        book.insert_side("bids_o0", vec![RawLevel::new("0.40", "10")]);
        book.insert_side("asks_o0", vec![RawLevel::new("0.44", "10")]);
        // o1 has no sides at all: bid defaults to 0, ask to 1.

        let pricing = price_market(&market, &book);
        let bob = pricing.outcome("Bob").unwrap();

        assert_eq!(bob.best_bid, Decimal::ZERO);
        assert_eq!(bob.best_ask, Decimal::ONE);
        assert_eq!(bob.probability, dec!(0.5));
        assert_eq!(bob.bid_ask_spread, Decimal::ONE);
    }

    #[test]
    fn multi_outcome_zero_sum_leaves_normalization_at_zero() {
        let market = multi_market(&["Alice", "Bob"]);
        let mut book = BookSnapshot::new();
        // Both books quote zero everywhere; the raw sum is zero and no
        // rescaling happens.
        for key in ["bids_o0", "asks_o0", "bids_o1", "asks_o1"] {
            book.insert_side(key, vec![RawLevel::new("0", "10")]);
        }

        let pricing = price_market(&market, &book);

        assert_eq!(pricing.total_implied_probability, Decimal::ZERO);
        assert_eq!(pricing.market_efficiency, Decimal::ONE);
        for estimate in pricing.outcome_prices.values() {
            assert_eq!(estimate.normalized_probability, Decimal::ZERO);
        }
    }

    #[test]
    fn spread_is_non_negative_for_any_input() {
        let market = multi_market(&["Alice", "Bob"]);
        let mut book = BookSnapshot::new();
        book.insert_side("bids_o0", vec![RawLevel::new("0.30", "10")]);
        book.insert_side("asks_o0", vec![RawLevel::new("0.35", "10")]);
        // o1's book is crossed: the ask string is malformed and parses to 0
        // while a real bid is quoted above it.
        book.insert_side("bids_o1", vec![RawLevel::new("0.40", "10")]);
        book.insert_side("asks_o1", vec![RawLevel::new("bogus", "10")]);

        let pricing = price_market(&market, &book);
        for estimate in pricing.outcome_prices.values() {
            assert!(estimate.bid_ask_spread >= Decimal::ZERO);
        }
    }

    #[test]
    fn failed_pricing_covers_every_outcome() {
        let market = multi_market(&["Alice", "Bob", "Carol"]);
        let pricing = failed_market_pricing(&market);

        assert_eq!(pricing.outcome_prices.len(), 3);
        for name in ["Alice", "Bob", "Carol"] {
            let estimate = pricing.outcome(name).unwrap();
            assert_eq!(estimate.probability, Decimal::ZERO);
            assert_eq!(estimate.best_bid, Decimal::ZERO);
            assert_eq!(estimate.best_ask, Decimal::ONE);
            assert_eq!(estimate.bid_ask_spread, Decimal::ONE);
        }
        assert_eq!(pricing.total_implied_probability, Decimal::ZERO);
        assert_eq!(pricing.market_efficiency, Decimal::ONE);
        assert_eq!(pricing.average_spread, Decimal::ONE);
    }

    #[test]
    fn failed_pricing_uses_canonical_binary_keys() {
        let market = binary_market();
        let pricing = failed_market_pricing(&market);

        assert!(pricing.outcome("Yes").is_some());
        assert!(pricing.outcome("No").is_some());
    }

    #[test]
    fn failed_pricing_keys_match_success_path_for_loose_binary_names() {
        // One outcome named "Yes" is enough for the binary path; the other
        // name is arbitrary. Failure and success must key identically.
        let market = Market::new(
            MarketId::new("m"),
            "q",
            "",
            vec![
                Outcome::new(OutcomeId::new("a"), "Yes"),
                Outcome::new(OutcomeId::new("b"), "Other"),
            ],
            None,
            vec![],
            None,
            0.0,
            0.0,
        );

        let failed = failed_market_pricing(&market);
        let priced = price_market(&market, &BookSnapshot::new());

        assert_eq!(failed.outcome_prices.len(), 2);
        assert!(failed.outcome("Yes").is_some());
        assert!(failed.outcome("No").is_some());

        let failed_keys: Vec<&String> = failed.outcome_prices.keys().collect();
        let priced_keys: Vec<&String> = priced.outcome_prices.keys().collect();
        assert_eq!(failed_keys, priced_keys);
    }
}
