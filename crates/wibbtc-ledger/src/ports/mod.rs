//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the ledger and the outside world.
//!
//! - **Driving Ports (Inbound)**: `WrappedTokenApi`, `GovernanceApi`
//! - **Driven Ports (Outbound)**: `UnderlyingAsset`, `RateSource`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
