//! Raw order book snapshots as supplied by the feed.
//!
//! Prices arrive as decimal strings; parsing into [`rust_decimal::Decimal`]
//! happens in the pricing module so that malformed quotes can fall back to
//! zero instead of failing the whole market.

use std::collections::HashMap;

use super::ids::OutcomeId;

/// One price level of an order book side. Levels are ordered best-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLevel {
    price: String,
    size: String,
}

impl RawLevel {
    /// Create a new level from raw price/size strings.
    pub fn new(price: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            size: size.into(),
        }
    }

    /// The raw price string, a decimal in `[0, 1]`.
    #[must_use]
    pub fn price(&self) -> &str {
        &self.price
    }

    /// The raw size string.
    #[must_use]
    pub fn size(&self) -> &str {
        &self.size
    }
}

/// An order book snapshot for one market.
///
/// Binary markets use the plain `bids`/`asks` keys; multi-outcome markets
/// key their sides per outcome as `bids_<outcome_id>`/`asks_<outcome_id>`.
/// Missing sides are represented by absence, not by empty levels.
#[derive(Debug, Clone, Default)]
pub struct BookSnapshot {
    sides: HashMap<String, Vec<RawLevel>>,
}

impl BookSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a side under its raw key.
    pub fn insert_side(&mut self, key: impl Into<String>, levels: Vec<RawLevel>) {
        self.sides.insert(key.into(), levels);
    }

    /// Levels of the market-level bid side (binary markets).
    #[must_use]
    pub fn bids(&self) -> &[RawLevel] {
        self.side("bids")
    }

    /// Levels of the market-level ask side (binary markets).
    #[must_use]
    pub fn asks(&self) -> &[RawLevel] {
        self.side("asks")
    }

    /// Levels of the bid side for one outcome (multi-outcome markets).
    #[must_use]
    pub fn bids_for(&self, outcome: &OutcomeId) -> &[RawLevel] {
        self.side(&format!("bids_{}", outcome.as_str()))
    }

    /// Levels of the ask side for one outcome (multi-outcome markets).
    #[must_use]
    pub fn asks_for(&self, outcome: &OutcomeId) -> &[RawLevel] {
        self.side(&format!("asks_{}", outcome.as_str()))
    }

    /// Best (first) bid price string, if the side is present and non-empty.
    #[must_use]
    pub fn best_bid(&self) -> Option<&str> {
        self.bids().first().map(RawLevel::price)
    }

    /// Best (first) ask price string, if the side is present and non-empty.
    #[must_use]
    pub fn best_ask(&self) -> Option<&str> {
        self.asks().first().map(RawLevel::price)
    }

    fn side(&self, key: &str) -> &[RawLevel] {
        self.sides.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_prices_from_binary_sides() {
        let mut book = BookSnapshot::new();
        book.insert_side("bids", vec![RawLevel::new("0.45", "100")]);
        book.insert_side("asks", vec![RawLevel::new("0.50", "100")]);

        assert_eq!(book.best_bid(), Some("0.45"));
        assert_eq!(book.best_ask(), Some("0.50"));
    }

    #[test]
    fn missing_sides_are_empty() {
        let book = BookSnapshot::new();
        assert!(book.bids().is_empty());
        assert_eq!(book.best_ask(), None);
    }

    #[test]
    fn per_outcome_sides_are_keyed_by_id() {
        let mut book = BookSnapshot::new();
        book.insert_side("bids_o1", vec![RawLevel::new("0.30", "10")]);
        book.insert_side("asks_o1", vec![RawLevel::new("0.34", "10")]);

        let o1 = OutcomeId::new("o1");
        let o2 = OutcomeId::new("o2");
        assert_eq!(book.bids_for(&o1).first().map(RawLevel::price), Some("0.30"));
        assert!(book.bids_for(&o2).is_empty());
    }
}
