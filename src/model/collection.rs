use std::sync::Arc;

use indexmap::IndexMap;

use crate::ops::reorder::{self, ReorderError};

/// Anything stored in an [`OrderedCollection`] must know its own key.
pub trait Identified {
    fn id(&self) -> &str;
}

/// An ordered sequence of identifiers plus the identifier → payload map.
///
/// Both halves sit behind `Arc`, so every "mutation" produces a new collection
/// that shares whatever it did not touch with the old one. `Arc::ptr_eq` on
/// [`OrderedCollection::entries_ptr_eq`] / [`OrderedCollection::order_ptr_eq`]
/// is how callers detect that a half was reused.
#[derive(Debug)]
pub struct OrderedCollection<T> {
    order: Arc<Vec<String>>,
    entries: Arc<IndexMap<String, Arc<T>>>,
}

impl<T> Clone for OrderedCollection<T> {
    fn clone(&self) -> Self {
        OrderedCollection {
            order: Arc::clone(&self.order),
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        OrderedCollection {
            order: Arc::new(Vec::new()),
            entries: Arc::new(IndexMap::new()),
        }
    }
}

impl<T: Identified> OrderedCollection<T> {
    /// Build a collection whose order is the order of `values`.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let mut order = Vec::new();
        let mut entries = IndexMap::new();
        for value in values {
            let id = value.id().to_string();
            order.push(id.clone());
            entries.insert(id, Arc::new(value));
        }
        OrderedCollection {
            order: Arc::new(order),
            entries: Arc::new(entries),
        }
    }

    /// Build a collection from raw parts. No validation is done here; call
    /// [`OrderedCollection::is_permutation`] before trusting the result.
    pub fn from_parts(order: Vec<String>, entries: IndexMap<String, Arc<T>>) -> Self {
        OrderedCollection {
            order: Arc::new(order),
            entries: Arc::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn entries(&self) -> &IndexMap<String, Arc<T>> {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Arc<T>> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Payload at a position in the order.
    pub fn at(&self, index: usize) -> Option<&Arc<T>> {
        self.order.get(index).and_then(|id| self.entries.get(id))
    }

    /// Position of an identifier in the order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|o| o == id)
    }

    /// Values in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// True when the order lists every key exactly once and nothing else.
    pub fn is_permutation(&self) -> bool {
        if self.order.len() != self.entries.len() {
            return false;
        }
        let mut seen = std::collections::HashSet::with_capacity(self.order.len());
        self.order
            .iter()
            .all(|id| self.entries.contains_key(id) && seen.insert(id.as_str()))
    }

    /// New collection with the identifier at `from` moved to `to`. The entry
    /// map is shared with `self`.
    pub fn move_index(&self, from: usize, to: usize) -> Result<Self, ReorderError> {
        let order = reorder::move_index(&self.order, from, to)?;
        Ok(OrderedCollection {
            order: Arc::new(order),
            entries: Arc::clone(&self.entries),
        })
    }

    /// New collection with the given entries replaced. The order is shared
    /// with `self`; every other entry keeps its `Arc`.
    pub fn with_replaced(&self, replacements: impl IntoIterator<Item = Arc<T>>) -> Self {
        let mut entries = (*self.entries).clone();
        for value in replacements {
            entries.insert(value.id().to_string(), value);
        }
        OrderedCollection {
            order: Arc::clone(&self.order),
            entries: Arc::new(entries),
        }
    }

    pub fn order_ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.order, &other.order)
    }

    pub fn entries_ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}
