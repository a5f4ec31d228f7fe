// Path: crates/api/src/state/overlay.rs

//! A copy-on-write state overlay that holds one call's writes until commit.

use crate::state::{StateAccess, StateChangeSet};
use cosio_types::error::StateError;
use std::collections::BTreeMap;

/// An in-memory, copy-on-write overlay for any `StateAccess`.
///
/// Reads are first checked against the local `writes` cache. If a key is not
/// found, the read is passed through to the underlying `base` state.
/// All writes are captured in the local cache and do not affect the `base` state.
/// Dropping the overlay discards them.
#[derive(Clone)]
pub struct StateOverlay<'a> {
    base: &'a dyn StateAccess,
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>, // BTreeMap for deterministic commit order.
}

impl<'a> StateOverlay<'a> {
    /// Creates a new, empty overlay on top of a base state accessor.
    pub fn new(base: &'a dyn StateAccess) -> Self {
        Self {
            base,
            writes: BTreeMap::new(),
        }
    }

    /// The number of keys written or deleted so far.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Consumes the overlay and returns its writes in key order.
    /// This is used to commit the call's state changes back to the base state.
    pub fn into_ordered_batch(self) -> StateChangeSet {
        let mut inserts = Vec::new();
        let mut deletes = Vec::new();

        for (key, value_opt) in self.writes {
            match value_opt {
                Some(value) => inserts.push((key, value)),
                None => deletes.push(key),
            }
        }
        (inserts, deletes)
    }
}

impl StateAccess for StateOverlay<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        match self.writes.get(key) {
            // Written in this call; `None` is a pending delete.
            Some(value_opt) => Ok(value_opt.clone()),
            None => self.base.get(key),
        }
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.writes.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.writes.insert(key.to_vec(), None);
        Ok(())
    }

    fn batch_apply(
        &mut self,
        inserts: &[(Vec<u8>, Vec<u8>)],
        deletes: &[Vec<u8>],
    ) -> Result<(), StateError> {
        for key in deletes {
            self.delete(key)?;
        }
        for (key, value) in inserts {
            self.insert(key, value)?;
        }
        Ok(())
    }
}
