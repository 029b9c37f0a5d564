//! Application orchestration: one fetch/analysis cycle over the ports.

use std::sync::Arc;

use chrono::Utc;
use futures_util::{stream, StreamExt};
use tracing::{info, warn};

use crate::analysis::{find_opportunities, DetectorConfig, PricedMarket};
use crate::domain::Opportunity;
use crate::error::Result;
use crate::port::{
    AnalysisDocument, MarketFeed, MarketRecord, RelationOracle, ResultSink, SnapshotDocument,
};
use crate::pricing::{failed_market_pricing, price_market};

/// Outcome of an analysis run.
pub struct AnalysisReport {
    pub total_markets: usize,
    pub opportunities: Vec<Opportunity>,
    pub oracle_relationships: usize,
}

/// Wires the ports together for one run at a time.
pub struct App {
    feed: Arc<dyn MarketFeed>,
    sink: Arc<dyn ResultSink>,
    oracle: Option<Arc<dyn RelationOracle>>,
    detector: DetectorConfig,
    max_concurrent_books: usize,
}

impl App {
    pub fn new(
        feed: Arc<dyn MarketFeed>,
        sink: Arc<dyn ResultSink>,
        oracle: Option<Arc<dyn RelationOracle>>,
        detector: DetectorConfig,
        max_concurrent_books: usize,
    ) -> Self {
        Self {
            feed,
            sink,
            oracle,
            detector,
            max_concurrent_books: max_concurrent_books.max(1),
        }
    }

    /// List markets by tag and price each one from its order book.
    ///
    /// Book fetches run with bounded concurrency; the listing order is
    /// preserved so downstream pair enumeration stays deterministic. A
    /// failed fetch degrades that one market to the conservative worst-case
    /// pricing, it never drops the market or aborts the cycle.
    pub async fn price_markets(&self, required_tags: &[String]) -> Result<Vec<PricedMarket>> {
        let markets = self.feed.list_markets(required_tags).await?;
        info!(
            feed = self.feed.feed_name(),
            count = markets.len(),
            ?required_tags,
            "listed markets"
        );

        let priced = stream::iter(markets)
            .map(|market| {
                let feed = Arc::clone(&self.feed);
                async move {
                    let pricing = match feed.fetch_book(market.id()).await {
                        Ok(book) => price_market(&market, &book),
                        Err(e) => {
                            warn!(
                                market_id = %market.id(),
                                error = %e,
                                "book fetch failed, using worst-case pricing"
                            );
                            failed_market_pricing(&market)
                        }
                    };
                    PricedMarket::new(market, pricing)
                }
            })
            .buffered(self.max_concurrent_books)
            .collect::<Vec<_>>()
            .await;

        Ok(priced)
    }

    /// Fetch cycle: price all matching markets and persist the snapshot.
    pub async fn fetch(&self, required_tags: &[String]) -> Result<SnapshotDocument> {
        let priced = self.price_markets(required_tags).await?;

        let now = Utc::now();
        let document = SnapshotDocument {
            timestamp: now.format("%Y%m%d_%H%M%S").to_string(),
            required_tags: required_tags.to_vec(),
            market_count: priced.len(),
            markets: priced
                .iter()
                .map(|p| MarketRecord::from_priced(p, now))
                .collect(),
        };

        self.sink.save_snapshot(&document).await?;
        Ok(document)
    }

    /// Analysis cycle: price, scan for opportunities, optionally consult
    /// the oracle, and persist the analysis document.
    pub async fn analyze(&self, required_tags: &[String]) -> Result<AnalysisReport> {
        let priced = self.price_markets(required_tags).await?;

        let opportunities = find_opportunities(&priced, &self.detector);
        for opp in &opportunities {
            info!(
                kind = opp.relationship.type_name(),
                net_profit = %opp.net_profit,
                risk = ?opp.risk_level,
                first = %opp.markets[0],
                second = %opp.markets[1],
                "opportunity"
            );
        }

        // The oracle is a higher-recall alternative view; its failure never
        // gates the deterministic scan above.
        let relationships = match &self.oracle {
            Some(oracle) => match oracle.analyze(&priced).await {
                Ok(relations) => {
                    info!(
                        oracle = oracle.oracle_name(),
                        count = relations.len(),
                        "oracle analysis complete"
                    );
                    relations
                }
                Err(e) => {
                    warn!(error = %e, "oracle analysis failed, continuing without it");
                    vec![]
                }
            },
            None => vec![],
        };

        let document = AnalysisDocument {
            timestamp: Utc::now().to_rfc3339(),
            total_markets: priced.len(),
            relationships,
        };
        self.sink.save_analysis(&document).await?;

        Ok(AnalysisReport {
            total_markets: priced.len(),
            oracle_relationships: document.relationships.len(),
            opportunities,
        })
    }
}
