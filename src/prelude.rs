//! Stride prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CART_STORAGE_KEY, CartLine, CartStore, DEFAULT_SIZE_LABEL, LineKey},
    catalog::{
        CatalogFilter, PriceBand, SortOrder,
        feed::{FeedClient, FeedError},
        find_product, search, sort_products,
    },
    checkout::{CheckoutError, CheckoutForm, OrderConfirmation, OrderNumber, place_order},
    fixtures::{FixtureError, load_catalog},
    notifications::{NotificationSink, Severity, SilentNotifier, TracingNotifier},
    prices::format_price,
    products::{Category, Product},
    receipt::{ReceiptError, write_cart, write_confirmation, write_products},
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
};
