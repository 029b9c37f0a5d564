//! Implementations of the external collaborator ports.

pub mod oracle;
pub mod polymarket;
pub mod sink;
