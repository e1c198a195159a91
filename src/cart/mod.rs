//! Cart
//!
//! The [`CartStore`] owns the shopper's cart for the session. Every mutation is
//! mirrored to a [`KeyValueStore`] as a full overwrite and announced through a
//! [`NotificationSink`].

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    time::Duration,
};

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{
    notifications::{DEFAULT_DISPLAY_DURATION, NotificationSink, Severity, SilentNotifier},
    products::Product,
    storage::KeyValueStore,
};

pub mod line;
pub mod snapshot;

pub use line::{CartLine, DEFAULT_SIZE_LABEL, LineKey};

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Shopping cart with persistence and notifications.
pub struct CartStore<S> {
    lines: Vec<CartLine>,
    storage: S,
    notifier: Box<dyn NotificationSink>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store and restore any cart previously saved in `storage`.
    ///
    /// A missing, unreadable or malformed saved cart leaves the cart empty.
    pub fn new(storage: S) -> Self {
        let mut store = Self {
            lines: Vec::new(),
            storage,
            notifier: Box::new(SilentNotifier),
        };

        store.rehydrate();

        store
    }

    /// Send notifications to `notifier` instead of discarding them.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl NotificationSink + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Add `quantity` units of `product` in `size`.
    ///
    /// Merges into the existing line for the same product and size, keeping its
    /// position; otherwise appends a new line. A zero quantity is ignored.
    pub fn add_item(&mut self, product: &Product, size: Option<&str>, quantity: u32) {
        if quantity == 0 {
            debug!(product_id = %product.id, "ignoring zero-quantity add");
            return;
        }

        let size_label = size
            .filter(|size| !size.is_empty())
            .unwrap_or(DEFAULT_SIZE_LABEL);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(&product.id, size))
        {
            line.increase(quantity);

            debug!(
                product_id = %product.id,
                size = size_label,
                quantity = line.quantity(),
                "updated cart line"
            );

            self.notify(
                &format!("Updated quantity: {} ({size_label})", product.name),
                Severity::Info,
            );
        } else {
            self.lines
                .push(CartLine::new(product.clone(), quantity, size));

            debug!(
                product_id = %product.id,
                size = size_label,
                quantity,
                "added cart line"
            );

            self.notify(
                &format!("Added to cart: {} ({size_label})", product.name),
                Severity::Success,
            );
        }

        self.persist();
    }

    /// Remove the first line for `product_id`, whatever its size.
    ///
    /// Returns the removed line, if there was one.
    pub fn remove_item(&mut self, product_id: &str) -> Option<CartLine> {
        let index = self
            .lines
            .iter()
            .position(|line| line.is_product(product_id))?;

        Some(self.remove_at(index))
    }

    /// Remove the line for exactly this product and size.
    ///
    /// Returns the removed line, if there was one.
    pub fn remove_line(&mut self, key: &LineKey) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.matches_key(key))?;

        Some(self.remove_at(index))
    }

    /// Set the quantity of every line for `product_id`, whatever its size.
    ///
    /// Quantities below one are ignored. Returns the number of lines changed.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> usize {
        if quantity < 1 {
            return 0;
        }

        let mut updated = 0;

        for line in self
            .lines
            .iter_mut()
            .filter(|line| line.is_product(product_id))
        {
            line.set_quantity(quantity);
            updated += 1;
        }

        if updated > 0 {
            self.persist();
        }

        updated
    }

    /// Set the quantity of the line for exactly this product and size.
    ///
    /// Quantities below one are ignored. Returns whether a line was changed.
    pub fn set_line_quantity(&mut self, key: &LineKey, quantity: u32) -> bool {
        if quantity < 1 {
            return false;
        }

        let Some(line) = self.lines.iter_mut().find(|line| line.matches_key(key)) else {
            return false;
        };

        line.set_quantity(quantity);

        self.persist();

        true
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();

        self.notify("Cart has been cleared", Severity::Info);

        self.persist();
    }

    fn remove_at(&mut self, index: usize) -> CartLine {
        let removed = self.lines.remove(index);

        self.notify(
            &format!("Removed from cart: {}", removed.product().name),
            Severity::Info,
        );

        self.persist();

        removed
    }

    fn rehydrate(&mut self) {
        let blob = match self.storage.read(CART_STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return,
            Err(error) => {
                warn!(%error, "could not read saved cart; starting empty");
                return;
            }
        };

        match snapshot::decode(&blob) {
            Ok(lines) => {
                debug!(lines = lines.len(), "restored saved cart");
                self.lines = lines;
            }
            Err(error) => warn!(%error, "discarding unusable saved cart"),
        }
    }

    fn persist(&self) {
        let blob = match snapshot::encode(&self.lines) {
            Ok(blob) => blob,
            Err(error) => {
                warn!(%error, "could not serialize cart");
                return;
            }
        };

        if let Err(error) = self.storage.write(CART_STORAGE_KEY, &blob) {
            warn!(%error, "could not save cart");
        }
    }
}

impl<S> CartStore<S> {
    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// The line for exactly this product and size, if present.
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches_key(key))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn total_item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Sum of unit price times quantity over all lines, unrounded.
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// The backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Send a notification through this store's sink.
    pub fn notify_for(&self, message: &str, severity: Severity, duration: Duration) {
        self.notifier.notify(message, severity, duration);
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notify_for(message, severity, DEFAULT_DISPLAY_DURATION);
    }
}

impl<'a, S> IntoIterator for &'a CartStore<S> {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl<S: Debug> Debug for CartStore<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}
