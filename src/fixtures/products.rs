//! Product Fixtures

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    prices::store_currency,
    products::{Category, Product},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product id -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product price (e.g., "129.99 USD")
    pub price: String,

    /// Category name (running, basketball, lifestyle, training)
    pub category: String,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Release timestamp (RFC 3339)
    pub released: String,

    /// Available colours
    #[serde(default)]
    pub colors: Vec<String>,

    /// Available sizes
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Featured flag
    #[serde(default)]
    pub featured: bool,
}

impl ProductFixture {
    /// Build a product with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the price, category or release date is invalid.
    pub fn into_product(self, id: String) -> Result<Product, FixtureError> {
        let price = parse_price(&self.price)?;

        let category = self
            .category
            .parse::<Category>()
            .map_err(|_err| FixtureError::InvalidCategory(self.category.clone()))?;

        let release_date = self
            .released
            .parse::<Timestamp>()
            .map_err(|_err| FixtureError::InvalidTimestamp(self.released.clone()))?;

        Ok(Product {
            id,
            name: self.name,
            description: self.description,
            price,
            category,
            image: self.image,
            release_date,
            colors: self.colors,
            sizes: self.sizes,
            featured: self.featured,
        })
    }
}

/// Parse price string (e.g., "129.99 USD") into an amount in the store currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if
/// the amount is not a non-negative decimal, or if the currency is not the
/// store currency.
pub fn parse_price(s: &str) -> Result<Decimal, FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let expected = store_currency().iso_alpha_code;

    if *currency_code != expected {
        return Err(FixtureError::CurrencyMismatch(
            expected.to_string(),
            (*currency_code).to_string(),
        ));
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("2.99USD");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_other_currencies() {
        let result = parse_price("2.99 GBP");

        assert!(matches!(
            result,
            Err(FixtureError::CurrencyMismatch(expected, found))
                if expected == "USD" && found == "GBP"
        ));
    }

    #[test]
    fn parse_price_rejects_negative_amounts() {
        assert!(matches!(
            parse_price("-1.00 USD"),
            Err(FixtureError::InvalidPrice(_))
        ));
    }

    #[test]
    fn parse_price_accepts_usd() -> TestResult {
        assert_eq!(parse_price("129.99 USD")?, Decimal::new(12_999, 2));

        Ok(())
    }

    #[test]
    fn fixture_converts_into_product() -> TestResult {
        let fixture: ProductFixture = serde_norway::from_str(
            r#"
name: Pegasus 41
price: "139.99 USD"
category: running
released: "2024-06-01T00:00:00Z"
sizes: ["9", "10"]
"#,
        )?;

        let product = fixture.into_product("pegasus-41".to_string())?;

        assert_eq!(product.id, "pegasus-41");
        assert_eq!(product.category, Category::Running);
        assert_eq!(product.sizes, ["9", "10"]);
        assert!(product.colors.is_empty());

        Ok(())
    }

    #[test]
    fn fixture_rejects_unknown_category() -> TestResult {
        let fixture: ProductFixture = serde_norway::from_str(
            r#"
name: Putter
price: "99.00 USD"
category: golf
released: "2024-06-01T00:00:00Z"
"#,
        )?;

        assert!(matches!(
            fixture.into_product("putter".to_string()),
            Err(FixtureError::InvalidCategory(category)) if category == "golf"
        ));

        Ok(())
    }
}
