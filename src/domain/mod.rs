//! Exchange-agnostic domain types.

mod book;
mod estimate;
mod ids;
mod market;
mod opportunity;
mod relation;

pub use book::{BookSnapshot, RawLevel};
pub use estimate::{MarketPricing, OutcomePriceEstimate};
pub use ids::{MarketId, OutcomeId};
pub use market::{Market, Outcome};
pub use opportunity::{ActionStep, Opportunity, RiskLevel, TradeSide};
pub use relation::RelationKind;
