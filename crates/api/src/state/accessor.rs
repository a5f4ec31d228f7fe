// Path: crates/api/src/state/accessor.rs
//! Defines the `StateAccess` trait for key-value storage operations.

use cosio_types::error::StateError;

/// A dyn-safe trait for the flat key-value store beneath all tables.
///
/// Keys and values are opaque bytes. Durability, ordering and concurrency are
/// the implementation's concern; the contract layer assumes only that a value
/// written is read back unchanged.
pub trait StateAccess: Send + Sync {
    /// Gets a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError>;

    /// Inserts a key-value pair, replacing any previous value.
    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError>;

    /// Deletes a key-value pair. Deleting an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), StateError>;

    /// Atomically applies a batch of inserts/updates and deletes.
    /// This is the method the executor commits a call's write set through.
    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError>;
}

// Blanket implementation to allow `StateAccess` to be used behind a `Box` trait object.
impl<T: StateAccess + ?Sized> StateAccess for Box<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        (**self).get(key)
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        (**self).insert(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        (**self).delete(key)
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        (**self).batch_apply(inserts, deletes)
    }
}
