// Path: crates/telemetry/src/lib.rs
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

//! # Cosio Telemetry
//!
//! Structured logging for anything that embeds the contract runtime: a
//! one-call JSON subscriber setup and an RAII timer that reports how long a
//! scope took.

/// The initialization routine for global structured logging.
pub mod init;
/// A simple RAII timer for measuring the duration of a scope.
pub mod time;

pub use init::{init_tracing, init_tracing_with};
pub use time::Timer;
