//! Polymarket CLOB REST feed.
//!
//! Implements [`MarketFeed`] against the CLOB API: cursor-paginated market
//! listing with tag filtering, and per-market order book snapshots.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::{BookSnapshot, Market, MarketId};
use crate::error::FeedError;
use crate::port::MarketFeed;

use super::dto::{book_from_response, MarketsResponse};

/// Sentinel cursor value marking the last page of the market listing.
const LAST_PAGE_CURSOR: &str = "LTE=";

/// HTTP client for the Polymarket CLOB API.
pub struct PolymarketFeed {
    client: Client,
    base_url: String,
}

impl PolymarketFeed {
    /// Create a new feed with the given base URL and per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn fetch_page(&self, cursor: &str) -> Result<MarketsResponse, FeedError> {
        let url = if cursor.is_empty() {
            format!("{}/markets", self.base_url)
        } else {
            format!("{}/markets?next_cursor={}", self.base_url, cursor)
        };

        debug!(url = %url, "fetching market page");

        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<MarketsResponse>()
            .await?;

        Ok(response)
    }
}

#[async_trait]
impl MarketFeed for PolymarketFeed {
    /// Walk the paginated listing until the `LTE=` sentinel, keeping only
    /// active, open markets tagged with every required tag.
    ///
    /// A mid-pagination failure stops the walk and returns what was
    /// accumulated so far; a shorter market set degrades the scan, it does
    /// not abort it.
    async fn list_markets(&self, required_tags: &[String]) -> Result<Vec<Market>, FeedError> {
        let mut markets = Vec::new();
        let mut cursor = String::new();

        loop {
            let page = match self.fetch_page(&cursor).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(error = %e, fetched = markets.len(), "market listing interrupted");
                    break;
                }
            };

            let page_markets: Vec<Market> = page
                .data
                .into_iter()
                .filter(|m| m.matches(required_tags))
                .map(|m| m.into_domain())
                .collect();

            info!(
                page_count = page_markets.len(),
                total = markets.len() + page_markets.len(),
                ?required_tags,
                "fetched market page"
            );
            markets.extend(page_markets);

            cursor = page.next_cursor.unwrap_or_else(|| LAST_PAGE_CURSOR.into());
            if cursor == LAST_PAGE_CURSOR {
                break;
            }
        }

        Ok(markets)
    }

    async fn fetch_book(&self, market_id: &MarketId) -> Result<BookSnapshot, FeedError> {
        let url = format!("{}/orderbook/book/{}", self.base_url, market_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(book_from_response(&response))
    }

    fn feed_name(&self) -> &'static str {
        "polymarket"
    }
}
