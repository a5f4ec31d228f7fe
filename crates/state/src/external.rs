// Path: crates/state/src/external.rs

//! Read-only handles onto tables owned by other contracts.

use crate::singleton::{SingletonRecord, SINGLETON_KEY};
use cosio_api::state::TableStore;
use cosio_types::app::Name;
use cosio_types::codec::{pack, unpack, Derived, PrimaryKey, Record};
use cosio_types::error::{ContractError, StateError};
use cosio_types::prelude::OptionExt;
use std::fmt;
use std::marker::PhantomData;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Location {
    owner: String,
    contract: String,
    table: String,
}

/// A read-only view of table `table` of contract `$contract@owner`, whose
/// location is supplied at run time.
///
/// Until [`bind`](ExternalTable::bind) or [`bind_name`](ExternalTable::bind_name)
/// gives it a location, every read fails with `StateError::Unbound`.
pub struct ExternalTable<R> {
    location: Option<Location>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for ExternalTable<R> {
    fn clone(&self) -> Self {
        Self {
            location: self.location.clone(),
            _record: PhantomData,
        }
    }
}

impl<R> fmt::Debug for ExternalTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalTable")
            .field("location", &self.location)
            .finish()
    }
}

impl<R> Default for ExternalTable<R> {
    fn default() -> Self {
        Self {
            location: None,
            _record: PhantomData,
        }
    }
}

impl<R: Record> ExternalTable<R> {
    /// An unbound handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle bound to `table` of contract `$contract@owner`.
    pub fn bound(owner: &str, contract: &str, table: &str) -> Result<Self, StateError> {
        let mut t = Self::new();
        t.bind(owner, contract, table)?;
        Ok(t)
    }

    /// Points the handle at `table` of contract `$contract@owner`.
    pub fn bind(&mut self, owner: &str, contract: &str, table: &str) -> Result<(), StateError> {
        self.bind_name(&Name::contract_of(owner, contract), table)
    }

    /// Points the handle at `table` of the contract named `contract`. Fails with
    /// `StateError::NotAContract` if `contract` is a plain account name.
    pub fn bind_name(&mut self, contract: &Name, table: &str) -> Result<(), StateError> {
        if !contract.is_contract() {
            return Err(StateError::NotAContract(contract.to_string()));
        }
        tracing::debug!(target: "table", contract = %contract, table, "bind external table");
        self.location = Some(Location {
            owner: contract.account().to_string(),
            contract: contract.contract().to_string(),
            table: table.to_string(),
        });
        Ok(())
    }

    /// Returns true once the handle has a location.
    pub fn is_bound(&self) -> bool {
        self.location.is_some()
    }

    fn location(&self) -> Result<&Location, StateError> {
        self.location.as_ref().required(StateError::Unbound)
    }

    fn find_at(&self, store: &dyn TableStore, key: &[u8]) -> Result<Option<R>, ContractError> {
        let loc = self.location()?;
        match store.query_external(&loc.owner, &loc.contract, &loc.table, key)? {
            Some(bytes) => Ok(Some(unpack(&bytes)?)),
            None => Ok(None),
        }
    }

    fn get_at(&self, store: &dyn TableStore, key: &[u8]) -> Result<R, ContractError> {
        let table = self.location()?.table.clone();
        Ok(self.find_at(store, key)?.required(StateError::KeyNotFound(table))?)
    }
}

impl<R: PrimaryKey> ExternalTable<R> {
    /// Returns true if the other contract stores a row under `key`.
    pub fn has(&self, store: &dyn TableStore, key: &R::Key) -> Result<bool, ContractError> {
        Ok(self.find_at(store, &pack(key)?)?.is_some())
    }

    /// Reads the row stored under `key`. Fails with `StateError::KeyNotFound`
    /// when there is none.
    pub fn get(&self, store: &dyn TableStore, key: &R::Key) -> Result<R, ContractError> {
        self.get_at(store, &pack(key)?)
    }

    /// Reads the row stored under `key`, or returns `default`.
    pub fn get_or_default(
        &self,
        store: &dyn TableStore,
        key: &R::Key,
        default: R,
    ) -> Result<R, ContractError> {
        Ok(self.find_at(store, &pack(key)?)?.unwrap_or(default))
    }
}

/// A read-only view of another contract's singleton.
pub struct ExternalSingleton<R> {
    table: ExternalTable<R>,
}

impl<R> Clone for ExternalSingleton<R> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<R> fmt::Debug for ExternalSingleton<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalSingleton")
            .field("location", &self.table.location)
            .finish()
    }
}

impl<R> Default for ExternalSingleton<R> {
    fn default() -> Self {
        Self {
            table: ExternalTable::default(),
        }
    }
}

impl<R: Derived<Base = SingletonRecord>> ExternalSingleton<R> {
    /// An unbound handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle bound to singleton `table` of contract `$contract@owner`.
    pub fn bound(owner: &str, contract: &str, table: &str) -> Result<Self, StateError> {
        Ok(Self {
            table: ExternalTable::bound(owner, contract, table)?,
        })
    }

    /// Points the handle at singleton `table` of contract `$contract@owner`.
    pub fn bind(&mut self, owner: &str, contract: &str, table: &str) -> Result<(), StateError> {
        self.table.bind(owner, contract, table)
    }

    /// Points the handle at singleton `table` of the contract named `contract`.
    pub fn bind_name(&mut self, contract: &Name, table: &str) -> Result<(), StateError> {
        self.table.bind_name(contract, table)
    }

    /// Returns true if the other contract has created its row.
    pub fn exists(&self, store: &dyn TableStore) -> Result<bool, ContractError> {
        Ok(self.table.find_at(store, &pack(&SINGLETON_KEY)?)?.is_some())
    }

    /// Reads the row. Fails with `StateError::KeyNotFound` before it is created.
    pub fn get(&self, store: &dyn TableStore) -> Result<R, ContractError> {
        self.table.get_at(store, &pack(&SINGLETON_KEY)?)
    }

    /// Reads the row, or returns `default`.
    pub fn get_or_default(&self, store: &dyn TableStore, default: R) -> Result<R, ContractError> {
        Ok(self
            .table
            .find_at(store, &pack(&SINGLETON_KEY)?)?
            .unwrap_or(default))
    }
}
