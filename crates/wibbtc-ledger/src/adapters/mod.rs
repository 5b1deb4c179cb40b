//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the outbound ports.
//! Production deployments bind the ports to the real asset and core instead.

pub mod memory_asset;
pub mod rate_source;

pub use memory_asset::*;
pub use rate_source::*;
