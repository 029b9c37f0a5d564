//! Arbscope - Price normalization and arbitrage scanning for prediction markets.
//!
//! This crate turns raw Polymarket order books into normalized probability
//! estimates and scans related markets for cross-market arbitrage.
//!
//! # Architecture
//!
//! A hexagonal layout keeps the scanning core free of I/O:
//!
//! - **`domain`** - Exchange-agnostic types: markets, order book snapshots,
//!   price estimates, relations, opportunities
//! - **`pricing`** - Order book to probability normalization
//! - **`analysis`** - Relationship classification, opportunity detection
//!   and ranking
//! - **`port`** - Trait seams for external collaborators (market feed,
//!   relation oracle, result sink)
//! - **`adapter`** - Concrete implementations: Polymarket CLOB client,
//!   OpenRouter-backed oracle, JSON file sink
//! - **`app`** - Orchestration of one fetch or analysis cycle
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files and the environment
//! - [`domain`] - Core types shared across layers
//! - [`pricing`] - Order book pricing and fail-soft fallbacks
//! - [`analysis`] - Deterministic relationship and arbitrage engine
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definitions for external collaborators
//! - [`adapter`] - Polymarket, OpenRouter, and filesystem adapters
//! - [`app`] - Application orchestration
//!
//! # Example
//!
//! ```no_run
//! use arbscope::analysis::{find_opportunities, DetectorConfig};
//!
//! let detector = DetectorConfig::default();
//! let opportunities = find_opportunities(&[], &detector);
//! assert!(opportunities.is_empty());
//! ```

pub mod adapter;
pub mod analysis;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod pricing;
