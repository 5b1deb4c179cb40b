//! # Domain Layer (Inner Hexagon)
//!
//! Pure share accounting.
//! NO I/O, NO locking, NO collaborator calls.
//!
//! Adapters and the service depend on this layer, never the reverse.

pub mod entities;
pub mod invariants;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use services::*;
pub use value_objects::*;
