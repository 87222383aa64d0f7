//! Shopping-list entries.

use serde::{Deserialize, Serialize};

use super::id::{EntryId, ProductId};

/// A single line item on the shopping list.
///
/// Entries added by name only carry no product reference and no category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListEntry {
    /// Position-independent handle used to toggle the entry.
    pub id: EntryId,
    /// Product name as shown on the list.
    pub name: String,
    /// Display-only check mark.
    pub is_checked: bool,
    /// Catalog product this entry was added from, if any.
    pub product_id: Option<ProductId>,
    /// Category label the entry is displayed under, if known.
    pub category: Option<String>,
}

impl ShoppingListEntry {
    /// Label used for entries that have no category.
    pub const UNCATEGORIZED: &'static str = "Uncategorized";

    /// The section label this entry is grouped under.
    #[must_use]
    pub fn section_label(&self) -> &str {
        self.category.as_deref().unwrap_or(Self::UNCATEGORIZED)
    }
}
