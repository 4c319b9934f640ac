//! # Accord Test Suite
//!
//! Unified test crate for cross-subsystem scenarios.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Fixtures: parties, vaults, notary, wiring helpers
//! └── integration/
//!     ├── intents.rs    # Happy paths for every proposer intent
//!     ├── failures.rs   # Aborts, timeouts, validation and signer failures
//!     └── notary.rs     # Double-spend and stale-state scenarios
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p accord-tests
//!
//! # By category
//! cargo test -p accord-tests integration::intents::
//! cargo test -p accord-tests integration::failures::
//! ```
//!
//! Per-crate unit tests live beside the code they cover; this crate only
//! exercises the subsystems together, over the in-memory adapters.

#![allow(dead_code)]

pub mod integration;
pub mod support;
