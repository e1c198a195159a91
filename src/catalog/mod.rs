//! Catalog
//!
//! Browsing helpers over an in-memory product list: filtering, free-text
//! search and sorting.

use std::{cmp::Reverse, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::products::{Category, Product};

pub mod feed;

/// Price bands offered as catalog filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceBand {
    /// Below 100
    Under100,

    /// 100 to 200 inclusive
    From100To200,

    /// Above 200
    Over200,
}

impl PriceBand {
    /// Whether `price` falls within this band.
    pub fn contains(self, price: Decimal) -> bool {
        let hundred = Decimal::ONE_HUNDRED;
        let two_hundred = Decimal::from(200);

        match self {
            PriceBand::Under100 => price < hundred,
            PriceBand::From100To200 => price >= hundred && price <= two_hundred,
            PriceBand::Over200 => price > two_hundred,
        }
    }
}

/// Returned when a string does not name a price band or sort order.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised {kind}: {value}")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl FromStr for PriceBand {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "under-100" => Ok(PriceBand::Under100),
            "100-200" => Ok(PriceBand::From100To200),
            "over-200" => Ok(PriceBand::Over200),
            other => Err(ParseOptionError {
                kind: "price band",
                value: other.to_string(),
            }),
        }
    }
}

/// Catalog sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Cheapest first
    PriceAsc,

    /// Most expensive first
    PriceDesc,

    /// Most recently released first
    #[default]
    Newest,
}

impl FromStr for SortOrder {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            "newest" => Ok(SortOrder::Newest),
            other => Err(ParseOptionError {
                kind: "sort order",
                value: other.to_string(),
            }),
        }
    }
}

/// Catalog filter. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Only this category
    pub category: Option<Category>,

    /// Any of these price bands
    pub price_bands: Vec<PriceBand>,

    /// Any of these colours
    pub colors: Vec<String>,

    /// Any of these sizes
    pub sizes: Vec<String>,
}

impl CatalogFilter {
    /// Whether `product` passes every criterion.
    pub fn matches(&self, product: &Product) -> bool {
        self.category
            .is_none_or(|category| product.category == category)
            && (self.price_bands.is_empty()
                || self
                    .price_bands
                    .iter()
                    .any(|band| band.contains(product.price)))
            && any_selected(&self.colors, &product.colors)
            && any_selected(&self.sizes, &product.sizes)
    }

    /// Products passing the filter, in their original order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .collect()
    }
}

fn any_selected(selected: &[String], available: &[String]) -> bool {
    selected.is_empty() || available.iter().any(|value| selected.contains(value))
}

/// Products where any whitespace-separated term of `query` appears in the name,
/// description or category, ignoring case. An empty query matches nothing.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.to_lowercase();
    let terms: Vec<&str> = query.split_whitespace().collect();

    if terms.is_empty() {
        return Vec::new();
    }

    products
        .iter()
        .filter(|product| {
            let name = product.name.to_lowercase();
            let description = product.description.to_lowercase();
            let category = product.category.as_str();

            terms.iter().any(|term| {
                name.contains(term) || description.contains(term) || category.contains(term)
            })
        })
        .collect()
}

/// Sort products in place. Ties keep their existing order.
pub fn sort_products(products: &mut [&Product], order: SortOrder) {
    match order {
        SortOrder::PriceAsc => products.sort_by_key(|product| product.price),
        SortOrder::PriceDesc => products.sort_by_key(|product| Reverse(product.price)),
        SortOrder::Newest => products.sort_by_key(|product| Reverse(product.release_date)),
    }
}

/// Look a product up by identifier.
pub fn find_product<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|product| product.id == id)
}
