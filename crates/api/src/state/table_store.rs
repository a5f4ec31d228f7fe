// Path: crates/api/src/state/table_store.rs
//! Defines the `TableStore` trait: state as a contract addresses it.

use cosio_types::error::StateError;

/// Table-addressed storage for the contract currently executing.
///
/// `table` names a table of the calling contract; `key` is the packed primary
/// key and `record` the packed row. Callers pass the key explicitly, computed
/// from the record's primary-key field. Raw `load`/`save` slots live beside the
/// tables, in a separate keyspace.
pub trait TableStore {
    /// Reads the row stored under `key`, if any.
    fn query(&self, table: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StateError>;

    /// Writes a row under `key`, replacing any existing row.
    fn insert(&mut self, table: &str, key: &[u8], record: &[u8]) -> Result<(), StateError>;

    /// Rewrites the row stored under `key`.
    fn update(&mut self, table: &str, key: &[u8], record: &[u8]) -> Result<(), StateError>;

    /// Removes the row stored under `key`. Removing an absent row is a no-op.
    fn delete(&mut self, table: &str, key: &[u8]) -> Result<(), StateError>;

    /// Reads a row from a table of another contract, identified by its owner
    /// account and contract name.
    fn query_external(
        &self,
        owner: &str,
        contract: &str,
        table: &str,
        key: &[u8],
    ) -> Result<Option<Vec<u8>>, StateError>;

    /// Reads a raw storage slot of the calling contract.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StateError>;

    /// Writes a raw storage slot of the calling contract.
    fn save(&mut self, key: &str, value: &[u8]) -> Result<(), StateError>;
}
