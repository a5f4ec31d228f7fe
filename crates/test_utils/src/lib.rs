// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Cosio Test Utilities
//!
//! Utilities for testing contracts and the contract data layer: a mock
//! `ChainHost`, call fixtures, codec assertions and deterministic randomness.

pub mod assertions;
pub mod fixtures;
pub mod host;
pub mod randomness;

#[doc(hidden)]
pub use {cosio_types, hex};

pub use fixtures::CallFixture;
pub use host::MockHost;
pub use randomness::TestRng;
