//! Persistence sink adapters.

mod json;

pub use json::JsonFileSink;
