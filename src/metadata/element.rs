use std::fmt;

use serde::{Deserialize, Serialize};

/// The kinds of indexed metadata element a table column can be owned by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// An `assay[n]` element.
    Assay,
    /// An `ms_run[n]` element.
    MsRun,
    /// A `study_variable[n]` element.
    StudyVariable,
    /// A `*_search_engine_score[n]` definition.
    SearchEngineScore,
}

impl ElementKind {
    /// The element name as written in metadata keys and column headers.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Assay => "assay",
            ElementKind::MsRun => "ms_run",
            ElementKind::StudyVariable => "study_variable",
            ElementKind::SearchEngineScore => "search_engine_score",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An id was inserted into a collection that already holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("id {0} is already defined")]
pub struct DuplicateId(pub u32);

/// An insertion-ordered collection of elements addressed by a positive
/// integer id.
///
/// Ids are unique within the collection and need not be contiguous;
/// iteration yields entries in insertion order while lookup goes by id.
/// Collections in a metadata block are small (tens of entries), so lookup
/// scans the backing vector rather than maintaining a second index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedMap<T> {
    entries: Vec<(u32, T)>,
}

impl<T> IndexedMap<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: u32) -> bool {
        self.entries.iter().any(|(i, _)| *i == id)
    }

    /// Look up the element with `id`.
    pub fn get(&self, id: u32) -> Option<&T> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, v)| v)
    }

    /// Mutable lookup of the element with `id`.
    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(i, _)| *i == id)
            .map(|(_, v)| v)
    }

    /// Register `value` under `id`. Adding an id twice is a caller error and
    /// is rejected rather than silently overwritten.
    pub fn insert(&mut self, id: u32, value: T) -> Result<(), DuplicateId> {
        if self.contains(id) {
            return Err(DuplicateId(id));
        }
        self.entries.push((id, value));
        Ok(())
    }

    /// Insert or replace the element under `id`, returning whether an
    /// earlier value was overwritten. Used where the line grammar allows
    /// redefinition with last-write-wins semantics.
    pub fn set(&mut self, id: u32, value: T) -> bool {
        if let Some(slot) = self.entries.iter_mut().find(|(i, _)| *i == id) {
            slot.1 = value;
            true
        } else {
            self.entries.push((id, value));
            false
        }
    }

    /// Look up `id`, creating the element with `default` on first reference.
    pub fn get_or_insert_with(&mut self, id: u32, default: impl FnOnce() -> T) -> &mut T {
        if let Some(pos) = self.entries.iter().position(|(i, _)| *i == id) {
            &mut self.entries[pos].1
        } else {
            self.entries.push((id, default()));
            // Just pushed, so the collection cannot be empty.
            let last = self.entries.len() - 1;
            &mut self.entries[last].1
        }
    }

    /// Iterate `(id, element)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.entries.iter().map(|(id, v)| (*id, v))
    }

    /// Iterate the registered ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }
}

impl<T> Default for IndexedMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut map = IndexedMap::new();
        map.insert(11, "a").unwrap();
        map.insert(2, "b").unwrap();
        map.insert(7, "c").unwrap();

        let ids: Vec<u32> = map.ids().collect();
        assert_eq!(ids, vec![11, 2, 7]);
        assert_eq!(map.get(2), Some(&"b"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut map = IndexedMap::new();
        map.insert(1, "a").unwrap();
        assert_eq!(map.insert(1, "b"), Err(DuplicateId(1)));
        assert_eq!(map.get(1), Some(&"a"));
    }

    #[test]
    fn lazy_creation() {
        let mut map: IndexedMap<Vec<u32>> = IndexedMap::new();
        map.get_or_insert_with(11, Vec::new).push(1);
        map.get_or_insert_with(11, Vec::new).push(2);
        map.get_or_insert_with(2, Vec::new).push(3);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(11), Some(&vec![1, 2]));
    }
}
