// Path: crates/state/src/memory.rs

//! An in-memory `StateAccess` backend for tests, simulations and tooling.

use cosio_api::state::StateAccess;
use cosio_types::error::StateError;
use std::collections::BTreeMap;

/// A `StateAccess` over an ordered in-memory map. `batch_apply` applies deletes
/// before inserts, so a key present in both ends up inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.data.iter().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }
}

impl StateAccess for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.data.get(key).cloned())
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.data.remove(key);
        Ok(())
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        for key in deletes {
            self.data.remove(key);
        }
        for (key, value) in inserts {
            self.data.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}
