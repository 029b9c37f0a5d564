//! Persistence sink port and the documents it accepts.
//!
//! Field names and nesting of the documents are part of the compatibility
//! contract - downstream consumers parse these structures.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::PricedMarket;
use crate::error::SinkError;

use super::oracle::OracleRelation;

/// One market with its pricing, as persisted in a snapshot document.
#[derive(Debug, Clone, Serialize)]
pub struct MarketRecord {
    pub id: String,
    pub question: String,
    pub description: String,
    /// Outcome names only.
    pub outcomes: Vec<String>,
    pub volume_24h: f64,
    pub end_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub prices: crate::domain::MarketPricing,
    pub liquidity_score: f64,
    /// When this market was priced.
    pub timestamp: DateTime<Utc>,
}

impl MarketRecord {
    /// Build a record from a priced market.
    pub fn from_priced(priced: &PricedMarket, timestamp: DateTime<Utc>) -> Self {
        let market = &priced.market;
        Self {
            id: market.id().as_str().to_string(),
            question: market.question().to_string(),
            description: market.description().to_string(),
            outcomes: market
                .outcomes()
                .iter()
                .map(|o| o.name().to_string())
                .collect(),
            volume_24h: market.volume_24h(),
            end_date: market.end_date(),
            category: market.category().map(str::to_string),
            tags: market.tags().to_vec(),
            prices: priced.pricing.clone(),
            liquidity_score: market.liquidity_score(),
            timestamp,
        }
    }
}

/// Document persisted after a fetch cycle.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotDocument {
    /// Compact `YYYYmmdd_HHMMSS` timestamp, shared with the filename.
    pub timestamp: String,
    pub required_tags: Vec<String>,
    pub market_count: usize,
    pub markets: Vec<MarketRecord>,
}

/// Document persisted after an oracle analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisDocument {
    /// ISO-8601 timestamp of the run.
    pub timestamp: String,
    pub total_markets: usize,
    pub relationships: Vec<OracleRelation>,
}

/// Writes computed results to durable storage.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Persist a market snapshot document.
    async fn save_snapshot(&self, document: &SnapshotDocument) -> Result<(), SinkError>;

    /// Persist an analysis document.
    async fn save_analysis(&self, document: &AnalysisDocument) -> Result<(), SinkError>;

    /// Sink name for logging/debugging.
    fn sink_name(&self) -> &'static str;
}
