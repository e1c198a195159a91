//! Products

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Running shoes and apparel
    Running,

    /// Basketball shoes and apparel
    Basketball,

    /// Everyday wear
    Lifestyle,

    /// Gym and training gear
    Training,
}

impl Category {
    /// Map a free-form sport tag onto a category.
    ///
    /// Anything unrecognised, including a missing tag, is treated as lifestyle.
    pub fn from_sport_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Category::Lifestyle;
        };

        let normalized = tag.to_lowercase();

        if normalized.contains("run") {
            Category::Running
        } else if normalized.contains("basket") {
            Category::Basketball
        } else if normalized.contains("train") || normalized.contains("gym") {
            Category::Training
        } else {
            Category::Lifestyle
        }
    }

    /// Lowercase name, as used in serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Running => "running",
            Category::Basketball => "basketball",
            Category::Lifestyle => "lifestyle",
            Category::Training => "training",
        }
    }
}

/// Returned when a string does not name a category.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "running" => Ok(Category::Running),
            "basketball" => Ok(Category::Basketball),
            "lifestyle" => Ok(Category::Lifestyle),
            "training" => Ok(Category::Training),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Description text
    #[serde(default)]
    pub description: String,

    /// Unit price, a JSON number in serialized form
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Product category
    pub category: Category,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Release timestamp
    pub release_date: Timestamp,

    /// Available colours
    #[serde(default)]
    pub colors: Vec<String>,

    /// Available sizes, in display order
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Whether the product is featured on the storefront
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Whether the product can be ordered in the given size.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|available| available == size)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn sport_tags_normalize_to_categories() {
        assert_eq!(Category::from_sport_tag(Some("Running")), Category::Running);
        assert_eq!(Category::from_sport_tag(Some("trail run")), Category::Running);
        assert_eq!(
            Category::from_sport_tag(Some("BASKETBALL")),
            Category::Basketball
        );
        assert_eq!(Category::from_sport_tag(Some("Training")), Category::Training);
        assert_eq!(Category::from_sport_tag(Some("gym")), Category::Training);
        assert_eq!(Category::from_sport_tag(Some("Golf")), Category::Lifestyle);
        assert_eq!(Category::from_sport_tag(None), Category::Lifestyle);
    }

    #[test]
    fn categories_parse_case_insensitively() {
        assert_eq!("Running".parse(), Ok(Category::Running));
        assert_eq!(" training ".parse(), Ok(Category::Training));
        assert_eq!(
            "golf".parse::<Category>(),
            Err(UnknownCategory("golf".to_string()))
        );
    }

    #[test]
    fn product_deserializes_from_camel_case_with_defaults() -> TestResult {
        let product: Product = serde_json::from_str(
            r#"{
                "id": "A1",
                "name": "Air Zoom",
                "price": 100,
                "category": "running",
                "releaseDate": "2024-03-01T00:00:00Z"
            }"#,
        )?;

        assert_eq!(product.id, "A1");
        assert_eq!(product.price, Decimal::from(100));
        assert_eq!(product.category, Category::Running);
        assert!(product.sizes.is_empty(), "sizes should default to empty");
        assert!(!product.featured, "featured should default to false");

        Ok(())
    }

    #[test]
    fn price_serializes_as_a_number() -> TestResult {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "A1",
            "name": "Air Zoom",
            "price": 139.99,
            "category": "running",
            "releaseDate": "2024-03-01T00:00:00Z",
        }))?;

        assert_eq!(product.price, Decimal::new(13_999, 2));

        let value = serde_json::to_value(&product)?;

        assert_eq!(value.get("price"), Some(&serde_json::json!(139.99)));

        Ok(())
    }

    #[test]
    fn has_size_checks_available_sizes() -> TestResult {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "B2",
            "name": "Court Classic",
            "price": "89.99",
            "category": "basketball",
            "releaseDate": "2023-11-15T12:00:00Z",
            "sizes": ["9", "10"],
        }))?;

        assert!(product.has_size("10"));
        assert!(!product.has_size("11"));

        Ok(())
    }
}
