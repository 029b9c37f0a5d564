//! Polymarket API response types.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{BookSnapshot, Market, MarketId, Outcome, OutcomeId, RawLevel};

#[derive(Debug, Deserialize)]
pub struct MarketsResponse {
    #[serde(default)]
    pub data: Vec<MarketDto>,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarketDto {
    pub id: String,
    pub question: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub outcomes: Vec<OutcomeDto>,
    #[serde(default)]
    pub active: bool,
    #[serde(default = "default_closed")]
    pub closed: bool,
    #[serde(rename = "volume24h")]
    pub volume_24h: Option<f64>,
    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub liquidity: Option<f64>,
}

// A market with no closed flag is treated as closed, not tradeable.
fn default_closed() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct OutcomeDto {
    pub id: String,
    pub name: String,
}

impl MarketDto {
    /// Whether this market passes the listing filter: active, not closed,
    /// and tagged with every required tag.
    #[must_use]
    pub fn matches(&self, required_tags: &[String]) -> bool {
        !self.closed
            && self.active
            && required_tags.iter().all(|tag| self.tags.contains(tag))
    }

    /// Convert into the domain market type.
    #[must_use]
    pub fn into_domain(self) -> Market {
        let outcomes = self
            .outcomes
            .into_iter()
            .map(|o| Outcome::new(OutcomeId::new(o.id), o.name))
            .collect();

        Market::new(
            MarketId::new(self.id),
            self.question.unwrap_or_default(),
            self.description.unwrap_or_default(),
            outcomes,
            self.end_date,
            self.tags,
            self.category,
            self.volume_24h.unwrap_or(0.0),
            self.liquidity.unwrap_or(0.0),
        )
    }
}

/// Build a book snapshot from the raw order book response.
///
/// The book object keys its sides dynamically (`bids`, `asks`,
/// `bids_<outcome_id>`, ...), so parsing is lenient: only keys with that
/// shape and array values of `{price, size}` objects are taken, everything
/// else is ignored. A level without a price string is dropped rather than
/// failing the book.
#[must_use]
pub fn book_from_response(value: &Value) -> BookSnapshot {
    let mut book = BookSnapshot::new();

    let Some(object) = value.as_object() else {
        return book;
    };

    for (key, side) in object {
        if !(key == "bids" || key == "asks" || key.starts_with("bids_") || key.starts_with("asks_"))
        {
            continue;
        }
        let Some(entries) = side.as_array() else {
            continue;
        };

        let levels: Vec<RawLevel> = entries
            .iter()
            .filter_map(|entry| {
                let price = entry.get("price")?.as_str()?;
                let size = entry.get("size").and_then(Value::as_str).unwrap_or("0");
                Some(RawLevel::new(price, size))
            })
            .collect();

        book.insert_side(key.clone(), levels);
    }

    book
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn market_filter_requires_all_tags() {
        let dto = MarketDto {
            id: "m1".into(),
            question: Some("q".into()),
            description: None,
            outcomes: vec![],
            active: true,
            closed: false,
            volume_24h: None,
            end_date: None,
            category: None,
            tags: vec!["Politics".into(), "Ukraine".into()],
            liquidity: None,
        };

        assert!(dto.matches(&["Politics".to_string()]));
        assert!(dto.matches(&["Politics".to_string(), "Ukraine".to_string()]));
        assert!(!dto.matches(&["Sports".to_string()]));
    }

    #[test]
    fn closed_or_inactive_markets_are_filtered() {
        let base = |active: bool, closed: bool| MarketDto {
            id: "m1".into(),
            question: None,
            description: None,
            outcomes: vec![],
            active,
            closed,
            volume_24h: None,
            end_date: None,
            category: None,
            tags: vec![],
            liquidity: None,
        };

        assert!(base(true, false).matches(&[]));
        assert!(!base(false, false).matches(&[]));
        assert!(!base(true, true).matches(&[]));
    }

    #[test]
    fn missing_closed_flag_defaults_to_closed() {
        let dto: MarketDto = serde_json::from_value(json!({
            "id": "m1",
            "active": true
        }))
        .unwrap();

        assert!(dto.closed);
        assert!(!dto.matches(&[]));
    }

    #[test]
    fn book_parses_binary_and_per_outcome_sides() {
        let response = json!({
            "market": "m1",
            "bids": [{"price": "0.45", "size": "100"}],
            "asks": [{"price": "0.50", "size": "80"}],
            "bids_o1": [{"price": "0.30"}],
            "timestamp": 1234,
        });

        let book = book_from_response(&response);

        assert_eq!(book.best_bid(), Some("0.45"));
        assert_eq!(book.best_ask(), Some("0.50"));
        assert_eq!(
            book.bids_for(&OutcomeId::new("o1"))
                .first()
                .map(RawLevel::price),
            Some("0.30")
        );
    }

    #[test]
    fn book_ignores_malformed_entries() {
        let response = json!({
            "bids": [{"size": "100"}, {"price": "0.40", "size": "10"}],
            "asks": "not-an-array",
        });

        let book = book_from_response(&response);

        assert_eq!(book.bids().len(), 1);
        assert_eq!(book.best_bid(), Some("0.40"));
        assert!(book.asks().is_empty());
    }

    #[test]
    fn non_object_response_yields_empty_book() {
        let book = book_from_response(&json!([1, 2, 3]));
        assert!(book.bids().is_empty());
        assert!(book.asks().is_empty());
    }
}
