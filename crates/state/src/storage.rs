// Path: crates/state/src/storage.rs

//! String-keyed storage slots that live beside a contract's tables.

use cosio_api::state::TableStore;
use cosio_types::codec::{pack, unpack, Pack, Unpack};
use cosio_types::error::{ContractError, StateError};
use cosio_types::prelude::OptionExt;

/// Entry point for raw storage: `Storage.value_of("config").put(state, &cfg)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Storage;

impl Storage {
    /// The slot called `key`.
    pub fn value_of(&self, key: impl Into<String>) -> StorageValue {
        StorageValue::new(key)
    }
}

/// A single storage slot holding one packed value of any type.
///
/// The slot does not remember the type written to it; reading it back as a
/// different type fails (or, for compatible encodings, silently succeeds) the
/// same way unpacking any mismatched bytes does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageValue {
    key: String,
}

impl StorageValue {
    /// The slot called `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The slot's key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Packs `value` into the slot, replacing its contents.
    pub fn put<T: Pack + ?Sized>(
        &self,
        store: &mut dyn TableStore,
        value: &T,
    ) -> Result<(), ContractError> {
        tracing::debug!(target: "table", slot = %self.key, "storage put");
        store.save(&self.key, &pack(value)?)?;
        Ok(())
    }

    /// Returns true if the slot has been written.
    pub fn exists(&self, store: &dyn TableStore) -> Result<bool, ContractError> {
        Ok(store.load(&self.key)?.is_some())
    }

    /// Unpacks the slot's contents. Fails with `StateError::KeyNotFound` if the
    /// slot was never written.
    pub fn get<T: Unpack>(&self, store: &dyn TableStore) -> Result<T, ContractError> {
        let bytes = store
            .load(&self.key)?
            .required(StateError::KeyNotFound(self.key.clone()))?;
        Ok(unpack(&bytes)?)
    }

    /// Unpacks the slot's contents, or returns `T::default()` if the slot was
    /// never written.
    pub fn get_or_default<T: Unpack + Default>(
        &self,
        store: &dyn TableStore,
    ) -> Result<T, ContractError> {
        match store.load(&self.key)? {
            Some(bytes) => Ok(unpack(&bytes)?),
            None => Ok(T::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use cosio_api::state::NamespacedTableStore;
    use cosio_types::app::Name;
    use std::collections::BTreeMap;

    #[test]
    fn put_then_get() {
        let mut mem = MemoryStore::new();
        let mut s = NamespacedTableStore::new(&mut mem, &Name::new("$c@o")).unwrap();
        let slot = Storage.value_of("limits");

        assert!(!slot.exists(&s).unwrap());
        assert_eq!(slot.get_or_default::<u64>(&s).unwrap(), 0);
        assert_eq!(
            slot.get::<u64>(&s).unwrap_err(),
            ContractError::State(StateError::KeyNotFound("limits".into()))
        );

        let mut limits = BTreeMap::new();
        limits.insert("daily".to_string(), 100u64);
        slot.put(&mut s, &limits).unwrap();

        assert!(slot.exists(&s).unwrap());
        assert_eq!(slot.get::<BTreeMap<String, u64>>(&s).unwrap(), limits);
    }

    #[test]
    fn slots_are_per_contract() {
        let mut mem = MemoryStore::new();
        {
            let mut s = NamespacedTableStore::new(&mut mem, &Name::new("$a@o")).unwrap();
            StorageValue::new("k").put(&mut s, "hello").unwrap();
        }
        let s = NamespacedTableStore::new(&mut mem, &Name::new("$b@o")).unwrap();
        assert!(!StorageValue::new("k").exists(&s).unwrap());
    }
}
