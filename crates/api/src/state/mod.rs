// Path: crates/api/src/state/mod.rs
//! Core traits for state management.
//!
//! This module defines the two layers contract state passes through:
//! - `StateAccess`: raw, flat key-value operations on the chain's store.
//! - `TableStore`: table-addressed operations as a contract sees them. The
//!   `NamespacedTableStore` implements it over any `StateAccess` by folding the
//!   calling contract and table name into the raw key.

// --- Module Structure ---

mod accessor;
pub mod namespaced;
mod overlay;
mod table_store;

// --- Public Exports ---

pub use accessor::*;
pub use namespaced::{storage_key, table_key, NamespacedTableStore};
pub use overlay::*;
pub use table_store::*;

/// A batch of key-value pairs to be inserted or updated in the state.
pub type StateInserts = Vec<(Vec<u8>, Vec<u8>)>;

/// A batch of keys to be deleted from the state.
pub type StateDeletes = Vec<Vec<u8>>;

/// A complete set of state changes (inserts/updates and deletes) from a call.
pub type StateChangeSet = (StateInserts, StateDeletes);
