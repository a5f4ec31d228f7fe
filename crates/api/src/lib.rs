// Path: crates/api/src/lib.rs

//! # Cosio API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # Cosio API
//!
//! The seams between contract code and the chain. Contracts see state only
//! through [`state::TableStore`], host queries only through
//! [`host::ChainHost`], and are invoked only through [`contract::Contract`].
//! Beneath the table store sits the raw key-value [`state::StateAccess`],
//! which the executor wraps in a copy-on-write [`state::StateOverlay`] for the
//! duration of a call.

// Lets `#[contract]` output resolve `::cosio_api` inside this crate's tests.
extern crate self as cosio_api;

/// The per-call context handed to every contract method.
pub mod context;
/// The `Contract` trait implemented by `#[contract]`.
pub mod contract;
/// Re-exports all core error types from the central `cosio-types` crate.
pub mod error;
/// The boundary to host-provided chain queries and side effects.
pub mod host;
/// Raw key-value access, the copy-on-write overlay and the table store.
pub mod state;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::context::CallContext;
    pub use crate::contract::Contract;
    pub use crate::error::{CodecError, ContractError, ErrorCode, StateError};
    pub use crate::host::ChainHost;
    pub use crate::state::{NamespacedTableStore, StateAccess, StateOverlay, TableStore};
}
