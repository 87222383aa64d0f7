//! Catalog records: products and the categories they are filed under.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A named grouping used to filter the catalog and label list sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Symbolic icon reference (e.g. `"cart"`), resolved by the front end.
    pub icon: String,
    /// Display name, also the value products refer to.
    pub name: String,
}

impl Category {
    /// Create a new category.
    #[must_use]
    pub fn new(icon: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            name: name.into(),
        }
    }
}

/// A purchasable product in the static catalog.
///
/// Products are immutable and held in memory for the lifetime of the process.
/// `category` should name one of the catalog's [`Category`] entries, but this
/// is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque unique identifier.
    #[serde(default = "ProductId::generate")]
    pub id: ProductId,
    /// Display name, matched by the search filter.
    pub name: String,
    /// Free-form description shown on the detail view.
    #[serde(default)]
    pub description: String,
    /// Name of the category this product is filed under.
    pub category: String,
}

impl Product {
    /// Create a product with a freshly minted ID.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId::generate(),
            name: name.into(),
            description: description.into(),
            category: category.into(),
        }
    }
}
