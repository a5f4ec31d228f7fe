// Path: crates/state/src/table.rs

//! Typed tables over a contract's `TableStore`.
//!
//! A row is stored under the packed bytes of its primary-key field, so two keys
//! address the same row exactly when their encodings are equal. Tables need no
//! creation step: a table exists as soon as a row is written to it.

use cosio_api::state::TableStore;
use cosio_types::codec::{pack, unpack, PrimaryKey, Record};
use cosio_types::error::{ContractError, StateError};
use cosio_types::prelude::OptionExt;
use std::fmt;
use std::marker::PhantomData;

/// A handle on the table `name` holding records of type `R`.
///
/// The handle owns nothing but the name. Every operation is a fresh round trip
/// to the store, and a row that fails to decode aborts the call with a codec
/// error.
pub struct Table<R> {
    name: String,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for Table<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _record: PhantomData,
        }
    }
}

impl<R> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table").field("name", &self.name).finish()
    }
}

impl<R: Record> Table<R> {
    /// A handle on the table called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _record: PhantomData,
        }
    }

    /// A handle on the table named after the record type.
    pub fn of_record() -> Self {
        Self::new(R::TYPE_NAME)
    }

    /// The table's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn find_at(
        &self,
        store: &dyn TableStore,
        key: &[u8],
    ) -> Result<Option<R>, ContractError> {
        match store.query(&self.name, key)? {
            Some(bytes) => Ok(Some(unpack(&bytes)?)),
            None => Ok(None),
        }
    }

    pub(crate) fn get_at(&self, store: &dyn TableStore, key: &[u8]) -> Result<R, ContractError> {
        let row = self.find_at(store, key)?;
        Ok(row.required(StateError::KeyNotFound(self.name.clone()))?)
    }

    pub(crate) fn insert_at(
        &self,
        store: &mut dyn TableStore,
        key: &[u8],
        record: &R,
    ) -> Result<(), ContractError> {
        tracing::debug!(target: "table", table = %self.name, key = %hex::encode(key), "insert");
        store.insert(&self.name, key, &pack(record)?)?;
        Ok(())
    }

    pub(crate) fn update_at(
        &self,
        store: &mut dyn TableStore,
        key: &[u8],
        record: &R,
    ) -> Result<(), ContractError> {
        tracing::debug!(target: "table", table = %self.name, key = %hex::encode(key), "update");
        store.update(&self.name, key, &pack(record)?)?;
        Ok(())
    }

    pub(crate) fn remove_at(
        &self,
        store: &mut dyn TableStore,
        key: &[u8],
    ) -> Result<(), ContractError> {
        tracing::debug!(target: "table", table = %self.name, key = %hex::encode(key), "remove");
        store.delete(&self.name, key)?;
        Ok(())
    }
}

impl<R: PrimaryKey> Table<R> {
    /// Returns true if a row is stored under `key`.
    pub fn has(&self, store: &dyn TableStore, key: &R::Key) -> Result<bool, ContractError> {
        Ok(store.query(&self.name, &pack(key)?)?.is_some())
    }

    /// Reads the row stored under `key`. Fails with `StateError::KeyNotFound`
    /// when there is none.
    pub fn get(&self, store: &dyn TableStore, key: &R::Key) -> Result<R, ContractError> {
        self.get_at(store, &pack(key)?)
    }

    /// Reads the row stored under `key`, or returns `default` without writing
    /// anything.
    pub fn get_or_default(
        &self,
        store: &dyn TableStore,
        key: &R::Key,
        default: R,
    ) -> Result<R, ContractError> {
        Ok(self.find_at(store, &pack(key)?)?.unwrap_or(default))
    }

    /// Reads the row stored under `key`; if there is none, inserts `default` and
    /// returns it. An existing row wins, so a second call with a different
    /// default returns the first row unchanged.
    ///
    /// Like [`Table::insert`], the default is stored under its own primary key,
    /// which callers normally set equal to `key`.
    pub fn get_or_create(
        &self,
        store: &mut dyn TableStore,
        key: &R::Key,
        default: R,
    ) -> Result<R, ContractError> {
        if let Some(existing) = self.find_at(store, &pack(key)?)? {
            return Ok(existing);
        }
        self.insert_at(store, &pack(default.primary_key())?, &default)?;
        Ok(default)
    }

    /// Builds a default record, lets `modifier` fill it in and stores it under
    /// its own primary key. A row already stored under that key is silently
    /// replaced.
    pub fn insert<F>(&self, store: &mut dyn TableStore, modifier: F) -> Result<(), ContractError>
    where
        R: Default,
        F: FnOnce(&mut R),
    {
        let mut record = R::default();
        modifier(&mut record);
        self.insert_at(store, &pack(record.primary_key())?, &record)
    }

    /// Reads the row under `key`, lets `modifier` change it and writes it back
    /// under the same key bytes, even if the modifier changed the key field.
    /// Fails with `StateError::KeyNotFound` when there is no row.
    pub fn update<F>(
        &self,
        store: &mut dyn TableStore,
        key: &R::Key,
        modifier: F,
    ) -> Result<(), ContractError>
    where
        F: FnOnce(&mut R),
    {
        let key = pack(key)?;
        let mut record = self.get_at(store, &key)?;
        modifier(&mut record);
        self.update_at(store, &key, &record)
    }

    /// Deletes the row under `key`. Removing an absent row does nothing.
    pub fn remove(&self, store: &mut dyn TableStore, key: &R::Key) -> Result<(), ContractError> {
        self.remove_at(store, &pack(key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use cosio_api::state::NamespacedTableStore;
    use cosio_macros::Record;
    use cosio_types::app::Name;
    use cosio_types::error::CodecError;
    use std::collections::HashSet;

    #[derive(Record, Debug, Clone, Default, PartialEq)]
    #[record(name = "balances")]
    struct Balance {
        #[record(primary_key)]
        owner: Name,
        amount: u64,
    }

    #[derive(Record, Debug, Clone, Default, PartialEq)]
    struct Group {
        #[record(primary_key)]
        members: HashSet<u32>,
        label: String,
    }

    #[derive(Record, Debug, Clone, Default, PartialEq)]
    struct Other {
        #[record(primary_key)]
        owner: Name,
    }

    fn store(mem: &mut MemoryStore) -> NamespacedTableStore<'_> {
        NamespacedTableStore::new(mem, &Name::new("$token@issuer")).unwrap()
    }

    fn alice() -> Name {
        Name::new("alice")
    }

    #[test]
    fn table_defaults_to_record_type_name() {
        assert_eq!(Table::<Balance>::of_record().name(), "balances");
        assert_eq!(Table::<Other>::of_record().name(), "Other");
    }

    #[test]
    fn insert_then_get_by_primary_key() {
        let mut mem = MemoryStore::new();
        let mut s = store(&mut mem);
        let t = Table::<Balance>::of_record();

        assert!(!t.has(&s, &alice()).unwrap());
        t.insert(&mut s, |b| {
            b.owner = alice();
            b.amount = 10;
        })
        .unwrap();

        assert!(t.has(&s, &alice()).unwrap());
        assert_eq!(t.get(&s, &alice()).unwrap().amount, 10);
    }

    #[test]
    fn get_of_absent_key_fails() {
        let mut mem = MemoryStore::new();
        let s = store(&mut mem);
        let t = Table::<Balance>::of_record();
        assert_eq!(
            t.get(&s, &alice()).unwrap_err(),
            ContractError::State(StateError::KeyNotFound("balances".into()))
        );
    }

    #[test]
    fn get_or_default_has_no_side_effect() {
        let mut mem = MemoryStore::new();
        let s = store(&mut mem);
        let t = Table::<Balance>::of_record();
        let d = Balance {
            owner: alice(),
            amount: 5,
        };
        assert_eq!(t.get_or_default(&s, &alice(), d.clone()).unwrap(), d);
        assert!(!t.has(&s, &alice()).unwrap());
        drop(s);
        assert!(mem.is_empty());
    }

    #[test]
    fn get_or_create_keeps_the_first_row() {
        let mut mem = MemoryStore::new();
        let mut s = store(&mut mem);
        let t = Table::<Balance>::of_record();
        let first = Balance {
            owner: alice(),
            amount: 1,
        };
        let second = Balance {
            owner: alice(),
            amount: 2,
        };

        assert_eq!(t.get_or_create(&mut s, &alice(), first.clone()).unwrap(), first);
        assert_eq!(t.get_or_create(&mut s, &alice(), second).unwrap(), first);
        assert_eq!(t.get(&s, &alice()).unwrap(), first);
    }

    #[test]
    fn duplicate_insert_overwrites() {
        let mut mem = MemoryStore::new();
        let mut s = store(&mut mem);
        let t = Table::<Balance>::of_record();
        for amount in [1, 2] {
            t.insert(&mut s, |b| {
                b.owner = alice();
                b.amount = amount;
            })
            .unwrap();
        }
        assert_eq!(t.get(&s, &alice()).unwrap().amount, 2);
    }

    #[test]
    fn update_writes_back_at_the_original_key() {
        let mut mem = MemoryStore::new();
        let mut s = store(&mut mem);
        let t = Table::<Balance>::of_record();
        t.insert(&mut s, |b| b.owner = alice()).unwrap();

        t.update(&mut s, &alice(), |b| {
            b.amount += 7;
            b.owner = Name::new("mallory");
        })
        .unwrap();

        let row = t.get(&s, &alice()).unwrap();
        assert_eq!(row.amount, 7);
        assert_eq!(row.owner, Name::new("mallory"));
        assert!(!t.has(&s, &Name::new("mallory")).unwrap());
    }

    #[test]
    fn update_of_absent_row_fails() {
        let mut mem = MemoryStore::new();
        let mut s = store(&mut mem);
        let t = Table::<Balance>::of_record();
        assert!(t.update(&mut s, &alice(), |b| b.amount = 1).is_err());
        assert!(!t.has(&s, &alice()).unwrap());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut mem = MemoryStore::new();
        let mut s = store(&mut mem);
        let t = Table::<Balance>::of_record();
        t.insert(&mut s, |b| b.owner = alice()).unwrap();
        t.remove(&mut s, &alice()).unwrap();
        t.remove(&mut s, &alice()).unwrap();
        assert!(!t.has(&s, &alice()).unwrap());
    }

    #[test]
    fn hash_set_keys_find_rows_by_equal_value() {
        let mut mem = MemoryStore::new();
        let mut s = store(&mut mem);
        let t = Table::<Group>::new("groups");
        t.insert(&mut s, |g| {
            g.members = (0..16).collect();
            g.label = "team".into();
        })
        .unwrap();

        for _ in 0..16 {
            let key: HashSet<u32> = (0..16).rev().collect();
            assert!(t.has(&s, &key).unwrap());
            assert_eq!(t.get(&s, &key).unwrap().label, "team");
        }
    }

    #[test]
    fn tables_with_different_names_are_disjoint() {
        let mut mem = MemoryStore::new();
        let mut s = store(&mut mem);
        let a = Table::<Balance>::new("a");
        let b = Table::<Balance>::new("b");
        a.insert(&mut s, |r| r.owner = alice()).unwrap();
        assert!(a.has(&s, &alice()).unwrap());
        assert!(!b.has(&s, &alice()).unwrap());
    }

    #[test]
    fn row_of_another_shape_fails_to_decode() {
        let mut mem = MemoryStore::new();
        let mut s = store(&mut mem);
        Table::<Other>::new("shared")
            .insert(&mut s, |r| r.owner = alice())
            .unwrap();
        let err = Table::<Balance>::new("shared").get(&s, &alice()).unwrap_err();
        assert!(matches!(
            err,
            ContractError::Codec(CodecError::SchemaMismatch { .. })
        ));
    }

    proptest::proptest! {
        #[test]
        fn rows_read_back_as_written(
            owner in "[a-z]{1,12}",
            amount in proptest::prelude::any::<u64>(),
        ) {
            let mut mem = MemoryStore::new();
            let mut s = store(&mut mem);
            let t = Table::<Balance>::of_record();
            let key = Name::new(owner);
            t.insert(&mut s, |b| {
                b.owner = key.clone();
                b.amount = amount;
            })
            .unwrap();
            proptest::prop_assert_eq!(t.get(&s, &key).unwrap().amount, amount);
        }
    }
}
