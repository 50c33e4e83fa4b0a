//! Keyed, insertion-ordered collection of records.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;

/// A record that can be stored in a [`Collection`].
pub trait Record {
    /// Identity type used as the collection key.
    type Id: Copy + Eq + Hash + Debug;

    /// This record's identity.
    fn id(&self) -> Self::Id;
}

/// One "table" of the record store.
///
/// Enforces nothing beyond identity: inserting a record whose ID is already
/// present replaces the old entry. Iteration follows insertion order.
#[derive(Debug, Clone)]
pub struct Collection<R: Record> {
    rows: IndexMap<R::Id, R>,
}

impl<R: Record> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Collection<R> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: IndexMap::new(),
        }
    }

    /// Insert a record, returning the entry it replaced, if any.
    pub fn insert(&mut self, record: R) -> Option<R> {
        self.rows.insert(record.id(), record)
    }

    /// Remove a record by ID, keeping the order of the remaining records.
    pub fn remove(&mut self, id: &R::Id) -> Option<R> {
        self.rows.shift_remove(id)
    }

    /// Find a record by ID.
    #[must_use]
    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.rows.get(id)
    }

    /// Find a record by ID for in-place mutation.
    pub fn get_mut(&mut self, id: &R::Id) -> Option<&mut R> {
        self.rows.get_mut(id)
    }

    /// Whether a record with this ID exists.
    #[must_use]
    pub fn contains(&self, id: &R::Id) -> bool {
        self.rows.contains_key(id)
    }

    /// Iterate over all records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.values()
    }

    /// Clone every record, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<R>
    where
        R: Clone,
    {
        self.rows.values().cloned().collect()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
