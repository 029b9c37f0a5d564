//! Trait definitions for external collaborators. Depend only on domain.

mod feed;
mod oracle;
mod sink;

pub use feed::MarketFeed;
pub use oracle::{OracleRelation, OracleRelationType, RelationOracle};
pub use sink::{AnalysisDocument, MarketRecord, ResultSink, SnapshotDocument};
