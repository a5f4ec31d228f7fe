// Path: crates/execution/src/lib.rs
//! # Cosio Execution Crate Lints
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
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]
//! # Cosio Execution
//!
//! This crate runs contract calls. A call is all-or-nothing: its writes are
//! collected in a copy-on-write overlay and reach the underlying state only if
//! the contract method returns `Ok`.

pub mod executor;

pub use crate::executor::{ContractExecutor, ExecutionReceipt};
