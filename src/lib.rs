//! Stride
//!
//! Stride is the storefront core of a sportswear shop: a product catalog, a
//! persistent shopping cart with user notifications, and a local checkout.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod fixtures;
pub mod notifications;
pub mod observability;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod receipt;
pub mod storage;
