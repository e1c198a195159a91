//! Fixtures
//!
//! Product catalogs described in YAML, for offline use and tests.

use std::{fs, path::Path};

use thiserror::Error;

use crate::products::Product;

pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Price quoted in a currency other than the store's
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Unknown category name
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// Release date is not an RFC 3339 timestamp
    #[error("Invalid release timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Parse a YAML product catalog, sorted by name.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or any product is invalid.
pub fn parse_catalog(yaml: &str) -> Result<Vec<Product>, FixtureError> {
    let fixture: products::ProductsFixture = serde_norway::from_str(yaml)?;

    let mut catalog = fixture
        .products
        .into_iter()
        .map(|(id, product)| product.into_product(id))
        .collect::<Result<Vec<_>, _>>()?;

    catalog.sort_by(|left, right| {
        left.name
            .cmp(&right.name)
            .then_with(|| left.id.cmp(&right.id))
    });

    Ok(catalog)
}

/// Load a YAML product catalog from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Product>, FixtureError> {
    let contents = fs::read_to_string(path)?;

    parse_catalog(&contents)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn catalog_is_sorted_by_name() -> TestResult {
        let catalog = parse_catalog(
            r#"
products:
  zoom:
    name: Zoom Fly
    price: "160.00 USD"
    category: running
    released: "2024-03-01T00:00:00Z"
  air:
    name: Air Max
    price: "150.00 USD"
    category: lifestyle
    released: "2023-03-01T00:00:00Z"
"#,
        )?;

        let names: Vec<&str> = catalog.iter().map(|product| product.name.as_str()).collect();

        assert_eq!(names, ["Air Max", "Zoom Fly"]);

        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_catalog("./does/not/exist.yml"),
            Err(FixtureError::Io(_))
        ));
    }

    #[test]
    fn bundled_catalog_loads() -> TestResult {
        let catalog = load_catalog(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/fixtures/products/catalog.yml"
        ))?;

        assert!(!catalog.is_empty(), "bundled catalog should not be empty");

        Ok(())
    }
}
