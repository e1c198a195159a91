//! Cart Lines

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::Product;

/// Label shown in place of a size when none was selected.
pub const DEFAULT_SIZE_LABEL: &str = "Default";

/// Identifies a cart line: the product plus the selected size, if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    product_id: String,
    size: Option<String>,
}

impl LineKey {
    /// Create a key for `product_id` in `size`.
    pub fn new(product_id: impl Into<String>, size: Option<&str>) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.map(str::to_string),
        }
    }

    /// The product identifier.
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// The selected size, if any.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }
}

impl Display for LineKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} ({})",
            self.product_id,
            self.size.as_deref().unwrap_or(DEFAULT_SIZE_LABEL)
        )
    }
}

/// A product in the cart, with how many and in which size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    product: Product,
    quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_size: Option<String>,
}

impl CartLine {
    pub(crate) fn new(product: Product, quantity: u32, selected_size: Option<&str>) -> Self {
        Self {
            product,
            quantity,
            selected_size: selected_size.map(str::to_string),
        }
    }

    /// The product on this line.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Number of units; always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The selected size, if any.
    pub fn selected_size(&self) -> Option<&str> {
        self.selected_size.as_deref()
    }

    /// Selected size, or the default label when none (or a blank one) was chosen.
    pub fn size_label(&self) -> &str {
        self.selected_size()
            .filter(|size| !size.is_empty())
            .unwrap_or(DEFAULT_SIZE_LABEL)
    }

    /// The merge key for this line.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product.id.as_str(), self.selected_size())
    }

    /// Unit price multiplied by quantity.
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    pub(crate) fn is_product(&self, product_id: &str) -> bool {
        self.product.id == product_id
    }

    pub(crate) fn matches(&self, product_id: &str, size: Option<&str>) -> bool {
        self.is_product(product_id) && self.selected_size() == size
    }

    pub(crate) fn matches_key(&self, key: &LineKey) -> bool {
        self.matches(key.product_id(), key.size())
    }

    pub(crate) fn increase(&mut self, quantity: u32) {
        self.quantity = self.quantity.saturating_add(quantity);
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}
