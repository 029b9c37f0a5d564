//! Market feed port.

use async_trait::async_trait;

use crate::domain::{BookSnapshot, Market, MarketId};
use crate::error::FeedError;

/// Supplies market listings and raw order book state.
///
/// Implementations own all transport concerns (pagination, timeouts,
/// retries). A `fetch_book` failure is not fatal to a run; the pricing
/// layer resolves it to a conservative worst-case estimate.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    /// Fetch all active markets that carry every one of `required_tags`.
    async fn list_markets(&self, required_tags: &[String]) -> Result<Vec<Market>, FeedError>;

    /// Fetch the order book snapshot for one market.
    async fn fetch_book(&self, market_id: &MarketId) -> Result<BookSnapshot, FeedError>;

    /// Feed name for logging/debugging.
    fn feed_name(&self) -> &'static str;
}
