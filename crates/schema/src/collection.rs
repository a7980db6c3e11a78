//! Ordered, append-only collections owned by a table
//!
//! Insertion order is emission order. Only the owning [`Table`](crate::Table)
//! can append, so every element has passed the table's attachment checks.

use crate::column::Column;
use crate::foreign_key::ForeignKey;

/// Ordered container of one entity kind
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

/// The columns of a table
pub type Columns = Collection<Column>;

/// The foreign keys of a table
pub type ForeignKeys = Collection<ForeignKey>;

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Columns {
    /// Find a column by exact (case-sensitive) name
    pub fn find(&self, name: &str) -> Option<&Column> {
        self.items.iter().find(|c| c.name() == name)
    }
}

// ============================================================================
// Tests
// ============================================================================
