//! Catalog filter predicate.

use shop_track_core::Product;

/// Current filter selection: an optional category plus free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Category name to match exactly, or `None` for every category.
    pub category: Option<String>,
    /// Case-insensitive substring of the product name; empty matches all.
    pub search_text: String,
}

impl ProductFilter {
    /// Whether `product` passes both the category and the search predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        matches_filter(product, self.category.as_deref(), &self.search_text)
    }

    /// Whether the filter lets every product through.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.search_text.is_empty()
    }
}

/// Filter `products` by category and name, preserving catalog order.
///
/// A product is kept when its category equals `category` (or no category is
/// selected) and its name contains `search_text` ignoring case (or the
/// search text is empty). Results are not ranked.
#[must_use]
pub fn filter_products(
    products: &[Product],
    category: Option<&str>,
    search_text: &str,
) -> Vec<Product> {
    products
        .iter()
        .filter(|p| matches_filter(p, category, search_text))
        .cloned()
        .collect()
}

fn matches_filter(product: &Product, category: Option<&str>, search_text: &str) -> bool {
    let category_ok = category.is_none_or(|c| product.category == c);
    let search_ok = search_text.is_empty()
        || product
            .name
            .to_lowercase()
            .contains(&search_text.to_lowercase());
    category_ok && search_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("Bread", "", "Bakery"),
            Product::new("Cheese", "", "Dairy"),
        ]
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_no_filter_returns_catalog_unchanged() {
        let catalog = catalog();
        assert_eq!(filter_products(&catalog, None, ""), catalog);
    }

    #[test]
    fn test_category_only() {
        let catalog = catalog();
        assert_eq!(names(&filter_products(&catalog, Some("Dairy"), "")), ["Cheese"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = catalog();
        assert_eq!(names(&filter_products(&catalog, None, "brea")), ["Bread"]);
        assert_eq!(names(&filter_products(&catalog, None, "EES")), ["Cheese"]);
    }

    #[test]
    fn test_category_and_search_are_anded() {
        let catalog = catalog();
        assert!(filter_products(&catalog, Some("Dairy"), "brea").is_empty());
        assert_eq!(names(&filter_products(&catalog, Some("Bakery"), "b")), ["Bread"]);
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        assert!(filter_products(&catalog(), Some("Electronics"), "").is_empty());
    }

    #[test]
    fn test_result_is_ordered_subsequence_and_complete() {
        let catalog = vec![
            Product::new("Apple Juice", "", "Beverages"),
            Product::new("Whole Wheat Bread", "", "Food"),
            Product::new("Apple Pie", "", "Food"),
            Product::new("Cheese", "", "Food"),
            Product::new("Ginger Soda", "", "Beverages"),
        ];

        for category in [None, Some("Food"), Some("Beverages"), Some("Clothing")] {
            for search in ["", "apple", "APP", "e", "zzz"] {
                let result = filter_products(&catalog, category, search);

                let expected: Vec<&Product> = catalog
                    .iter()
                    .filter(|p| category.is_none_or(|c| p.category == c))
                    .filter(|p| p.name.to_lowercase().contains(&search.to_lowercase()))
                    .collect();

                assert_eq!(result.iter().collect::<Vec<_>>(), expected);
            }
        }
    }

    #[test]
    fn test_product_filter_matches() {
        let filter = ProductFilter {
            category: Some("Dairy".to_string()),
            search_text: "ch".to_string(),
        };
        let catalog = catalog();
        assert!(!filter.matches(&catalog[0]));
        assert!(filter.matches(&catalog[1]));
        assert!(ProductFilter::default().is_empty());
        assert!(!filter.is_empty());
    }
}
