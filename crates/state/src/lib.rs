// Path: crates/state/src/lib.rs
//! # Cosio State Crate Lints
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
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # Cosio State
//!
//! Typed access to contract state. A [`Table`] stores records keyed by the
//! packed bytes of their primary-key field; a [`Singleton`] is a table that
//! holds at most one row; an [`ExternalTable`] reads another contract's table;
//! [`Storage`] addresses raw string-keyed slots. All of them are thin handles
//! that carry only a name and go to the [`TableStore`](cosio_api::state::TableStore)
//! on every operation: nothing is cached between calls.

/// Read-only handles onto other contracts' tables and singletons.
pub mod external;
/// An in-memory `StateAccess` backend.
pub mod memory;
/// Singleton tables and the `SingletonRecord` base.
pub mod singleton;
/// Raw string-keyed storage slots.
pub mod storage;
/// Typed tables keyed by a record's primary key.
pub mod table;

pub use external::{ExternalSingleton, ExternalTable};
pub use memory::MemoryStore;
pub use singleton::{Singleton, SingletonRecord, SINGLETON_KEY};
pub use storage::{Storage, StorageValue};
pub use table::Table;

/// A prelude for easily importing the most common types.
pub mod prelude {
    pub use crate::{
        ExternalSingleton, ExternalTable, MemoryStore, Singleton, SingletonRecord, Storage,
        StorageValue, Table,
    };
}
