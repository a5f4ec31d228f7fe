// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use cosio_types::error::{CodecError, ContractError, ErrorCode, StateError};
pub use cosio_types::Result;
