//! # wibBTC Test Suite
//!
//! Unified test crate for the share ledger.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── integration/
//! │   ├── flows.rs        # End-to-end mint / transfer / burn lifecycles
//! │   ├── failures.rs     # Collaborator failures and rollback
//! │   ├── properties.rs   # proptest accounting properties
//! │   ├── randomized.rs   # Seeded random operation sequences
//! │   └── concurrency.rs  # Many callers against one ledger
//! └── fixtures.rs         # Shared deployment helpers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p wibbtc-tests
//!
//! # By category
//! cargo test -p wibbtc-tests integration::flows
//! cargo test -p wibbtc-tests integration::properties
//!
//! # Benchmarks
//! cargo bench -p wibbtc-tests
//! ```

#![allow(dead_code)]
