//! Product catalog and the filtered product view.
//!
//! [`Catalog`] is the immutable set of products and categories.
//! [`CatalogService`] wraps it with the current [`ProductFilter`] and
//! publishes the filtered products to subscribers whenever the filter moves.

mod filter;
mod loader;

pub use filter::{ProductFilter, filter_products};

use std::collections::HashSet;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use shop_track_core::{Category, Product, ProductId};

/// Errors from building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid YAML for a catalog.
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Two categories share a name, so filtering by name would be ambiguous.
    #[error("duplicate category: {0}")]
    DuplicateCategory(String),

    /// Two products share an ID, so lookups by ID would be ambiguous.
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),
}

/// Static product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from categories and products, in display order.
    ///
    /// Products whose category is not listed are kept but logged.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateCategory` if two categories share a name.
    /// Returns `CatalogError::DuplicateProduct` if two products share an ID.
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.name.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.name.clone()));
            }
        }

        let mut ids = HashSet::new();
        for product in &products {
            if !ids.insert(product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        let catalog = Self {
            categories,
            products,
        };

        for product in catalog.orphaned_products() {
            warn!(
                product = %product.name,
                category = %product.category,
                "Product references an unknown category"
            );
        }

        Ok(catalog)
    }

    /// The catalog shipped with the app.
    #[must_use]
    pub fn builtin() -> Self {
        let categories = vec![
            Category::new("applescript", "Food"),
            Category::new("cart", "Beverages"),
            Category::new("house", "Household"),
            Category::new("scissors", "Health & Beauty"),
            Category::new("tv", "Electronics"),
            Category::new("tshirt", "Clothing"),
        ];
        let products = vec![
            Product::new("Apple Juice", "Freshly squeezed apple juice.", "Beverages"),
            Product::new("Whole Wheat Bread", "Organic whole wheat bread.", "Food"),
            Product::new("Cheese", "Cheddar cheese.", "Food"),
        ];
        Self {
            categories,
            products,
        }
    }

    /// Categories in authored order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Products in authored order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a category by name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up the first product with exactly this name, ignoring case.
    #[must_use]
    pub fn product_by_name(&self, name: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Other products in the same category as `id`, in catalog order.
    ///
    /// Empty if `id` is unknown.
    #[must_use]
    pub fn related_products(&self, id: ProductId) -> Vec<&Product> {
        let Some(product) = self.product(id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.id != id && p.category == product.category)
            .collect()
    }

    /// Products whose category is not one of the catalog's categories.
    #[must_use]
    pub fn orphaned_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| self.category(&p.category).is_none())
            .collect()
    }
}

/// Catalog plus the current filter selection.
///
/// Filter changes recompute the visible products synchronously and publish
/// them through a watch channel.
#[derive(Debug)]
pub struct CatalogService {
    catalog: Catalog,
    filter: watch::Sender<ProductFilter>,
    visible: watch::Sender<Vec<Product>>,
}

impl CatalogService {
    /// Create a service showing the whole catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        let (filter, _) = watch::channel(ProductFilter::default());
        let (visible, _) = watch::channel(catalog.products().to_vec());
        Self {
            catalog,
            filter,
            visible,
        }
    }

    /// The underlying catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Categories in authored order.
    #[must_use]
    pub fn list_categories(&self) -> &[Category] {
        self.catalog.categories()
    }

    /// Current filter selection.
    #[must_use]
    pub fn filter(&self) -> ProductFilter {
        self.filter.borrow().clone()
    }

    /// Products passing the current filter.
    #[must_use]
    pub fn visible_products(&self) -> Vec<Product> {
        self.visible.borrow().clone()
    }

    /// Subscribe to the filtered product list.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.visible.subscribe()
    }

    /// Filter the catalog without touching the current selection.
    #[must_use]
    pub fn filter_products(&self, category: Option<&str>, search_text: &str) -> Vec<Product> {
        filter_products(self.catalog.products(), category, search_text)
    }

    /// Restrict the view to one category.
    pub fn select_category(&self, name: &str) {
        self.update_filter(|f| f.category = Some(name.to_string()));
    }

    /// Show every category again.
    pub fn clear_category(&self) {
        self.update_filter(|f| f.category = None);
    }

    /// Replace the search text.
    pub fn set_search_text(&self, text: &str) {
        self.update_filter(|f| f.search_text = text.to_string());
    }

    /// Drop both the category and the search text.
    pub fn reset_filter(&self) {
        self.update_filter(|f| *f = ProductFilter::default());
    }

    fn update_filter(&self, apply: impl FnOnce(&mut ProductFilter)) {
        let changed = self.filter.send_if_modified(|filter| {
            let before = filter.clone();
            apply(filter);
            *filter != before
        });
        if !changed {
            return;
        }

        let filter = self.filter();
        let products: Vec<Product> = self
            .catalog
            .products()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        debug!(
            category = ?filter.category,
            search = %filter.search_text,
            visible = products.len(),
            "Catalog filter updated"
        );
        self.visible.send_replace(products);
    }
}
