//! Relationship oracle port.
//!
//! The oracle is an external, possibly LLM-backed service that offers a
//! higher-recall classification of cross-market relationships. It is an
//! alternative to the deterministic classifier, never a replacement for
//! the deterministic profit math.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analysis::PricedMarket;
use crate::error::OracleError;

/// Relationship category as reported by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleRelationType {
    MutuallyExclusive,
    Complementary,
    Conditional,
    Unrelated,
}

/// One confidence-scored relationship claim from the oracle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleRelation {
    /// Questions of the markets involved.
    pub markets: Vec<String>,
    pub relationship_type: OracleRelationType,
    /// Confidence in `[0, 1]`.
    pub confidence_score: f64,
    pub explanation: String,
    pub potential_arbitrage: bool,
    #[serde(default)]
    pub combined_probability: Option<f64>,
    pub arbitrage_explanation: String,
}

/// Analyzes a batch of priced markets for cross-market relationships.
#[async_trait]
pub trait RelationOracle: Send + Sync {
    /// Analyze the given markets and return relationship claims.
    async fn analyze(&self, markets: &[PricedMarket]) -> Result<Vec<OracleRelation>, OracleError>;

    /// Oracle name for logging/debugging.
    fn oracle_name(&self) -> &'static str;
}
