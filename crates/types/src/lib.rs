// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
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

//! # Cosio Types
//!
//! The foundational crate of the Cosio contract data layer. It contains the
//! binary wire codec (varints, streams and the pack/unpack rules), the record
//! reflection traits that composite types implement, the well-known value
//! types (`Name`, checksums) and the error taxonomy shared by every other
//! crate in the workspace.
//!
//! ## Architectural Role
//!
//! `cosio-types` has no workspace dependencies and is itself a dependency of
//! almost every other crate. Derived code emitted by `cosio-macros` refers to
//! items in this crate by their absolute `::cosio_types` path.

// Lets the derive macros' absolute paths resolve inside this crate's own tests.
extern crate self as cosio_types;

/// The maximum size in bytes for a packed record written to a table.
pub const MAX_RECORD_BYTES: usize = 256 * 1024; // 256 KiB
/// The default cap on the raw argument buffer of a single call.
pub const MAX_CALL_ARGS_BYTES: usize = 64 * 1024; // 64 KiB

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::ContractError> = std::result::Result<T, E>;

/// Well-known value types: account/contract names, checksums and amounts.
pub mod app;
/// The binary wire codec: varints, streams, pack/unpack and record reflection.
pub mod codec;
/// Configuration structures for the call executor.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
/// A prelude containing useful extension traits like `OptionExt`.
pub mod prelude;
