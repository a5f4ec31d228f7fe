// Path: crates/state/src/singleton.rs

//! Tables that hold exactly one row.

use crate::table::Table;
use cosio_api::state::TableStore;
use cosio_macros::Record;
use cosio_types::codec::{pack, Derived, Record};
use cosio_types::error::ContractError;

/// The key every singleton row is stored under.
pub const SINGLETON_KEY: i32 = 1;

/// The base every singleton record derives from. Its only field is the row key,
/// which always equals [`SINGLETON_KEY`].
#[derive(Record, Debug, Clone, PartialEq, Eq, Hash)]
#[record(name = "singleton_record")]
pub struct SingletonRecord {
    /// The row key. Overwritten with [`SINGLETON_KEY`] on every write.
    pub id: i32,
}

impl Default for SingletonRecord {
    fn default() -> Self {
        Self { id: SINGLETON_KEY }
    }
}

fn normalize<R: Derived<Base = SingletonRecord>>(record: &mut R) {
    record.base_mut().id = SINGLETON_KEY;
}

fn the_key() -> Result<Vec<u8>, ContractError> {
    Ok(pack(&SINGLETON_KEY)?)
}

/// A table restricted to the single row keyed by [`SINGLETON_KEY`].
///
/// ```ignore
/// #[derive(Record, Default)]
/// struct Stats {
///     #[record(base)]
///     base: SingletonRecord,
///     total_supply: u64,
/// }
///
/// let stats = Singleton::<Stats>::new("stats");
/// stats.get_or_create(state, Stats::default())?;
/// stats.update(state, |s| s.total_supply += 100)?;
/// ```
#[derive(Debug, Clone)]
pub struct Singleton<R> {
    table: Table<R>,
}

impl<R: Derived<Base = SingletonRecord>> Singleton<R> {
    /// A singleton stored in the table called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: Table::new(name),
        }
    }

    /// A singleton stored in the table named after the record type.
    pub fn of_record() -> Self {
        Self::new(R::TYPE_NAME)
    }

    /// The underlying table's name.
    pub fn name(&self) -> &str {
        self.table.name()
    }

    /// Returns true if the row has been created.
    pub fn exists(&self, store: &dyn TableStore) -> Result<bool, ContractError> {
        Ok(self.table.find_at(store, &the_key()?)?.is_some())
    }

    /// Reads the row. Fails with `StateError::KeyNotFound` before it is created.
    pub fn get(&self, store: &dyn TableStore) -> Result<R, ContractError> {
        self.table.get_at(store, &the_key()?)
    }

    /// Reads the row, or returns `default` without writing anything.
    pub fn get_or_default(&self, store: &dyn TableStore, default: R) -> Result<R, ContractError> {
        Ok(self.table.find_at(store, &the_key()?)?.unwrap_or(default))
    }

    /// Reads the row, creating it from `default` if absent. The stored default
    /// has its key normalized to [`SINGLETON_KEY`], and so does the returned copy.
    pub fn get_or_create(
        &self,
        store: &mut dyn TableStore,
        mut default: R,
    ) -> Result<R, ContractError> {
        let key = the_key()?;
        if let Some(existing) = self.table.find_at(store, &key)? {
            return Ok(existing);
        }
        normalize(&mut default);
        self.table.insert_at(store, &key, &default)?;
        Ok(default)
    }

    /// Reads the row, applies `modifier`, resets the key field to
    /// [`SINGLETON_KEY`] and writes the row back. A modifier that changes the
    /// key is normalized rather than rejected.
    pub fn update<F>(&self, store: &mut dyn TableStore, modifier: F) -> Result<(), ContractError>
    where
        F: FnOnce(&mut R),
    {
        let key = the_key()?;
        let mut record = self.table.get_at(store, &key)?;
        modifier(&mut record);
        normalize(&mut record);
        self.table.update_at(store, &key, &record)
    }

    /// Deletes the row, if any.
    pub fn remove(&self, store: &mut dyn TableStore) -> Result<(), ContractError> {
        self.table.remove_at(store, &the_key()?)
    }
}
