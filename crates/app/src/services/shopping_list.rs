//! In-memory shopping list.
//!
//! The list only grows: entries are appended in call order, never merged or
//! removed. Check marks are display state and are not persisted.

use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

use shop_track_core::{EntryId, Product, ProductId, ShoppingListEntry};

/// Name of the placeholder entries in a preview list.
pub const SAMPLE_ITEM_NAME: &str = "Sample Item";

/// Category of the placeholder entries in a preview list.
pub const SAMPLE_CATEGORY: &str = "sample category";

/// Number of placeholder entries in a preview list.
pub const SAMPLE_ITEM_COUNT: usize = 10;

/// Errors from shopping-list operations.
#[derive(Debug, Error)]
pub enum ListError {
    /// No entry has this ID.
    #[error("no list entry with id {0}")]
    EntryNotFound(EntryId),
}

/// Entries sharing one category label, for grouped display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSection {
    pub label: String,
    pub entries: Vec<ShoppingListEntry>,
}

/// The user's shopping list.
#[derive(Debug)]
pub struct ShoppingList {
    entries: watch::Sender<Vec<ShoppingListEntry>>,
}

impl Default for ShoppingList {
    fn default() -> Self {
        Self::new()
    }
}

impl ShoppingList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        let (entries, _) = watch::channel(Vec::new());
        Self { entries }
    }

    /// Append an entry holding only a product name.
    ///
    /// Adding the same name twice yields two entries.
    pub fn add_to_list(&self, product_name: &str) -> EntryId {
        self.push(product_name.to_string(), None, None)
    }

    /// Append an entry for a catalog product, keeping its ID and category.
    pub fn add_product(&self, product: &Product) -> EntryId {
        self.push(
            product.name.clone(),
            Some(product.id),
            Some(product.category.clone()),
        )
    }

    /// Append the placeholder entries shown in preview mode.
    pub fn add_samples(&self) {
        for _ in 0..SAMPLE_ITEM_COUNT {
            self.push(
                SAMPLE_ITEM_NAME.to_string(),
                None,
                Some(SAMPLE_CATEGORY.to_string()),
            );
        }
    }

    /// Flip an entry's check mark and return the new value.
    ///
    /// # Errors
    ///
    /// Returns `ListError::EntryNotFound` if no entry has `id`.
    pub fn toggle_checked(&self, id: EntryId) -> Result<bool, ListError> {
        let mut checked = None;
        self.entries.send_if_modified(|entries| {
            match entries.iter_mut().find(|e| e.id == id) {
                Some(entry) => {
                    entry.is_checked = !entry.is_checked;
                    checked = Some(entry.is_checked);
                    true
                }
                None => false,
            }
        });
        checked.ok_or(ListError::EntryNotFound(id))
    }

    /// Snapshot of all entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<ShoppingListEntry> {
        self.entries.borrow().clone()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Entries grouped by category label, sections in first-appearance order.
    #[must_use]
    pub fn sections(&self) -> Vec<ListSection> {
        let mut sections: Vec<ListSection> = Vec::new();
        for entry in self.entries.borrow().iter() {
            let label = entry.section_label();
            match sections.iter_mut().find(|s| s.label == label) {
                Some(section) => section.entries.push(entry.clone()),
                None => sections.push(ListSection {
                    label: label.to_string(),
                    entries: vec![entry.clone()],
                }),
            }
        }
        sections
    }

    /// Subscribe to list changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<ShoppingListEntry>> {
        self.entries.subscribe()
    }

    fn push(
        &self,
        name: String,
        product_id: Option<ProductId>,
        category: Option<String>,
    ) -> EntryId {
        let mut id = EntryId::new(1);
        self.entries.send_modify(|entries| {
            id = entries
                .last()
                .map_or(EntryId::new(1), |e| EntryId::new(e.id.as_i64() + 1));
            entries.push(ShoppingListEntry {
                id,
                name,
                is_checked: false,
                product_id,
                category,
            });
        });
        debug!(entry_id = %id, "Added list entry");
        id
    }
}
