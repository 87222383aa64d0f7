//! One-shot catalog listings.
//!
//! These read the catalog only and never open the store.

use std::io::Write;

use shop_track::config::AppConfig;
use shop_track::error::AppError;
use shop_track::services::catalog::{Catalog, filter_products};

use super::CliError;

fn load(config: &AppConfig) -> Result<Catalog, CliError> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_yaml_file(path).map_err(AppError::from)?,
        None => Catalog::builtin(),
    };
    Ok(catalog)
}

/// Print categories in display order.
///
/// # Errors
///
/// Returns an error if a configured catalog file is invalid.
pub fn categories(config: &AppConfig) -> Result<(), CliError> {
    let catalog = load(config)?;
    let mut out = std::io::stdout().lock();
    for category in catalog.categories() {
        writeln!(out, "{:<16} [{}]", category.name, category.icon)?;
    }
    Ok(())
}

/// Print products passing the filter, in catalog order.
///
/// # Errors
///
/// Returns an error if a configured catalog file is invalid.
pub fn products(config: &AppConfig, category: Option<&str>, search: &str) -> Result<(), CliError> {
    let catalog = load(config)?;
    let products = filter_products(catalog.products(), category, search);

    let mut out = std::io::stdout().lock();
    for product in &products {
        writeln!(
            out,
            "{:<24} {:<16} {}",
            product.name, product.category, product.description
        )?;
    }
    if products.is_empty() {
        writeln!(out, "No matching products")?;
    }
    Ok(())
}
