//! # Toolbar
//!
//! Ordered, uniquely named items shown above a document's content.

use std::cell::RefCell;

/// A single toolbar entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarItem {
    pub label: String,
    pub tooltip: String,
}

impl ToolbarItem {
    pub fn new(label: &str, tooltip: &str) -> Self {
        Self {
            label: label.to_string(),
            tooltip: tooltip.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Toolbar {
    items: RefCell<Vec<(String, ToolbarItem)>>,
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Returns false if the name is taken.
    pub fn add_item(&self, name: &str, item: ToolbarItem) -> bool {
        let len = self.len();
        self.insert_item(len, name, item)
    }

    /// Insert an item at `index` (clamped). Returns false if the name is taken.
    pub fn insert_item(&self, index: usize, name: &str, item: ToolbarItem) -> bool {
        let mut items = self.items.borrow_mut();
        if items.iter().any(|(existing, _)| existing == name) {
            tracing::debug!("Toolbar: item '{}' already present", name);
            return false;
        }
        let index = index.min(items.len());
        items.insert(index, (name.to_string(), item));
        true
    }

    pub fn item(&self, name: &str) -> Option<ToolbarItem> {
        self.items
            .borrow()
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, item)| item.clone())
    }

    pub fn names(&self) -> Vec<String> {
        self.items
            .borrow()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}
