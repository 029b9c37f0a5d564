//! Polymarket market feed adapter.

mod client;
mod dto;

pub use client::PolymarketFeed;
