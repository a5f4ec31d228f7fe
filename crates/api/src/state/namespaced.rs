// Path: crates/api/src/state/namespaced.rs

//! A table store that maps a contract's tables into the flat key-value space.

use crate::state::{StateAccess, TableStore};
use cosio_types::app::Name;
use cosio_types::codec::{GrowableBuffer, Pack};
use cosio_types::error::StateError;
use cosio_types::MAX_RECORD_BYTES;

/// Marks a raw key as belonging to a table row.
const TABLE_SPACE: u8 = 0x01;
/// Marks a raw key as belonging to a raw storage slot.
const STORAGE_SPACE: u8 = 0x02;

fn namespace(space: u8, owner: &str, contract: &str, name: &str) -> Result<Vec<u8>, StateError> {
    let mut buf = GrowableBuffer::default();
    let written = space
        .pack_to(&mut buf)
        .and_then(|_| owner.pack_to(&mut buf))
        .and_then(|_| contract.pack_to(&mut buf))
        .and_then(|_| name.pack_to(&mut buf));
    written.map_err(|e| StateError::Backend(e.to_string()))?;
    Ok(buf.into_inner())
}

/// The raw key of row `key` in `table` of contract `$contract@owner`.
///
/// The prefix is the space marker followed by the three length-prefixed names,
/// so no two `(owner, contract, table)` triples share a prefix and the row key
/// can follow it unframed.
pub fn table_key(
    owner: &str,
    contract: &str,
    table: &str,
    key: &[u8],
) -> Result<Vec<u8>, StateError> {
    let mut raw = namespace(TABLE_SPACE, owner, contract, table)?;
    raw.extend_from_slice(key);
    Ok(raw)
}

/// The raw key of storage slot `key` of contract `$contract@owner`.
pub fn storage_key(owner: &str, contract: &str, key: &str) -> Result<Vec<u8>, StateError> {
    namespace(STORAGE_SPACE, owner, contract, key)
}

/// A `TableStore` scoped to one contract, writing through to a `StateAccess`.
///
/// It enforces two policies:
/// 1.  **Namespacing:** every table and storage key of the contract is qualified
///     with its owner and contract name, so contracts cannot collide. Only
///     `query_external` reads outside the contract's own namespace, and it
///     cannot write.
/// 2.  **Size limit:** a packed row or storage value larger than the configured
///     record limit is refused with `StateError::ValueTooLarge`.
pub struct NamespacedTableStore<'a> {
    inner: &'a mut dyn StateAccess,
    owner: String,
    contract: String,
    max_record_bytes: usize,
}

impl<'a> NamespacedTableStore<'a> {
    /// Creates a table store for the contract named `contract`
    /// (`$contract@owner`). Fails with `NotAContract` for a plain account name.
    pub fn new(inner: &'a mut dyn StateAccess, contract: &Name) -> Result<Self, StateError> {
        if !contract.is_contract() {
            return Err(StateError::NotAContract(contract.to_string()));
        }
        Ok(Self {
            inner,
            owner: contract.account().to_string(),
            contract: contract.contract().to_string(),
            max_record_bytes: MAX_RECORD_BYTES,
        })
    }

    /// Replaces the per-write size limit.
    pub fn with_record_limit(mut self, max_record_bytes: usize) -> Self {
        self.max_record_bytes = max_record_bytes;
        self
    }

    #[inline]
    fn qualify(&self, table: &str, key: &[u8]) -> Result<Vec<u8>, StateError> {
        table_key(&self.owner, &self.contract, table, key)
    }

    #[inline]
    fn check_size(&self, value: &[u8]) -> Result<(), StateError> {
        if value.len() > self.max_record_bytes {
            tracing::warn!(
                target: "table",
                contract = %format_args!("${}@{}", self.contract, self.owner),
                size = value.len(),
                limit = self.max_record_bytes,
                "Refusing oversized write"
            );
            return Err(StateError::ValueTooLarge {
                limit: self.max_record_bytes,
                got: value.len(),
            });
        }
        Ok(())
    }
}

impl TableStore for NamespacedTableStore<'_> {
    fn query(&self, table: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        self.inner.get(&self.qualify(table, key)?)
    }

    fn insert(&mut self, table: &str, key: &[u8], record: &[u8]) -> Result<(), StateError> {
        self.check_size(record)?;
        let raw = self.qualify(table, key)?;
        self.inner.insert(&raw, record)
    }

    fn update(&mut self, table: &str, key: &[u8], record: &[u8]) -> Result<(), StateError> {
        self.check_size(record)?;
        let raw = self.qualify(table, key)?;
        self.inner.insert(&raw, record)
    }

    fn delete(&mut self, table: &str, key: &[u8]) -> Result<(), StateError> {
        let raw = self.qualify(table, key)?;
        self.inner.delete(&raw)
    }

    fn query_external(
        &self,
        owner: &str,
        contract: &str,
        table: &str,
        key: &[u8],
    ) -> Result<Option<Vec<u8>>, StateError> {
        tracing::trace!(target: "table", owner, contract, table, "external read");
        self.inner.get(&table_key(owner, contract, table, key)?)
    }

    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        self.inner
            .get(&storage_key(&self.owner, &self.contract, key)?)
    }

    fn save(&mut self, key: &str, value: &[u8]) -> Result<(), StateError> {
        self.check_size(value)?;
        let raw = storage_key(&self.owner, &self.contract, key)?;
        self.inner.insert(&raw, value)
    }
}
