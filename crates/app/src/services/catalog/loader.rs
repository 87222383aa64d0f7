//! YAML catalog files.
//!
//! ```yaml
//! categories:
//!   - { icon: cart, name: Beverages }
//!   - { icon: applescript, name: Food }
//! products:
//!   - name: Apple Juice
//!     description: Freshly squeezed apple juice.
//!     category: Beverages
//! ```
//!
//! Product `id`s are optional; missing ones are minted at load time.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use shop_track_core::{Category, Product};

use super::{Catalog, CatalogError};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    products: Vec<Product>,
}

impl Catalog {
    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` on malformed YAML,
    /// `CatalogError::DuplicateCategory` if a category name repeats and
    /// `CatalogError::DuplicateProduct` if a product ID repeats.
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::new(file.categories, file.products)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise the
    /// same errors as [`Catalog::from_yaml_str`].
    pub fn from_yaml_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&content)?;
        info!(
            path = %path.display(),
            categories = catalog.categories().len(),
            products = catalog.products().len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use shop_track_core::ProductId;

    use super::*;

    const SAMPLE: &str = r"
categories:
  - { icon: basket, name: Bakery }
  - { icon: drop, name: Dairy }
products:
  - name: Bread
    description: Sourdough loaf.
    category: Bakery
  - name: Cheese
    category: Dairy
";

    #[test]
    fn test_parse_sample() {
        let catalog = Catalog::from_yaml_str(SAMPLE).unwrap();
        let names: Vec<&str> = catalog.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Bread", "Cheese"]);
        assert_eq!(catalog.categories().len(), 2);
        assert!(catalog.orphaned_products().is_empty());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Catalog::from_yaml_str("products: [ { name: 3"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let yaml = "categories:\n  - { icon: a, name: Food }\n  - { icon: b, name: Food }\n";
        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::DuplicateCategory(name)) if name == "Food"
        ));
    }

    #[test]
    fn test_duplicate_product_id_rejected() {
        let yaml = r"
categories:
  - { icon: drop, name: Dairy }
products:
  - { id: 6f1c2a7e-3b4d-4e5f-8a9b-0c1d2e3f5b6c, name: Cheese, category: Dairy }
  - { id: 6f1c2a7e-3b4d-4e5f-8a9b-0c1d2e3f5b6c, name: Milk, category: Dairy }
";
        let expected: ProductId = "6f1c2a7e-3b4d-4e5f-8a9b-0c1d2e3f5b6c".parse().unwrap();
        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::DuplicateProduct(id)) if id == expected
        ));
    }

    #[test]
    fn test_explicit_product_ids_are_kept() {
        let yaml = r"
categories:
  - { icon: drop, name: Dairy }
products:
  - { id: 6f1c2a7e-3b4d-4e5f-8a9b-0c1d2e3f5b6c, name: Cheese, category: Dairy }
  - { id: 0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d, name: Milk, category: Dairy }
";
        let catalog = Catalog::from_yaml_str(yaml).unwrap();
        let milk: ProductId = "0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d".parse().unwrap();

        assert_eq!(catalog.product(milk).unwrap().name, "Milk");
        let related: Vec<&str> = catalog
            .related_products(milk)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(related, ["Cheese"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = Catalog::from_yaml_file(file.path()).unwrap();
        assert_eq!(catalog.products().len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let result = Catalog::from_yaml_file(Path::new("/nonexistent/catalog.yaml"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
