//! Relationship classification, arbitrage detection, and ranking.

mod classify;
mod detector;
mod engine;

pub use classify::{are_complementary, are_temporal, classify, is_nested};
pub use detector::{check_relation, DetectorConfig, PricedMarket};
pub use engine::{find_opportunities, rank};
