//! Carts saved by one session are restored by the next.
//!
//! Each test opens a [`FileStore`] in a temporary directory, works with a cart,
//! drops it, and then opens a fresh [`CartStore`] over the same file.

use std::{fs, path::PathBuf};

use rust_decimal::Decimal;
use tempfile::TempDir;
use testresult::TestResult;

use stride::{
    cart::{CART_STORAGE_KEY, CartStore, LineKey},
    catalog::find_product,
    fixtures::load_catalog,
    products::Product,
    storage::{FileStore, KeyValueStore},
};

fn catalog() -> TestResult<Vec<Product>> {
    Ok(load_catalog(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/fixtures/products/catalog.yml"
    ))?)
}

fn product<'a>(catalog: &'a [Product], id: &str) -> TestResult<&'a Product> {
    Ok(find_product(catalog, id).ok_or_else(|| format!("{id} missing from catalog"))?)
}

fn storage_path(dir: &TempDir) -> PathBuf {
    dir.path().join("data").join("storage.json")
}

#[test]
fn cart_survives_a_new_session() -> TestResult {
    let dir = TempDir::new()?;
    let catalog = catalog()?;
    let pegasus = product(&catalog, "pegasus-41")?;
    let cap = product(&catalog, "club-cap")?;

    {
        let mut cart = CartStore::new(FileStore::new(storage_path(&dir)));

        cart.add_item(pegasus, Some("10"), 2);
        cart.add_item(cap, None, 1);
    }

    let cart = CartStore::new(FileStore::new(storage_path(&dir)));

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total_item_count(), 3);
    assert_eq!(
        cart.total_price(),
        pegasus.price * Decimal::from(2) + cap.price
    );

    let line = cart
        .line(&LineKey::new("pegasus-41", Some("10")))
        .ok_or("pegasus line missing")?;

    assert_eq!(line.quantity(), 2);
    assert_eq!(line.product(), pegasus);

    Ok(())
}

#[test]
fn quantities_accumulate_across_sessions() -> TestResult {
    let dir = TempDir::new()?;
    let catalog = catalog()?;
    let metcon = product(&catalog, "metcon-9")?;

    CartStore::new(FileStore::new(storage_path(&dir))).add_item(metcon, Some("9"), 3);
    CartStore::new(FileStore::new(storage_path(&dir))).add_item(metcon, Some("9"), 2);

    let cart = CartStore::new(FileStore::new(storage_path(&dir)));

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total_item_count(), 5);

    Ok(())
}

#[test]
fn cleared_cart_is_saved_empty() -> TestResult {
    let dir = TempDir::new()?;
    let catalog = catalog()?;

    {
        let mut cart = CartStore::new(FileStore::new(storage_path(&dir)));

        cart.add_item(product(&catalog, "blazer-mid")?, Some("9"), 1);
        cart.clear();
    }

    let store = FileStore::new(storage_path(&dir));
    let blob = store.read(CART_STORAGE_KEY)?.ok_or("cart was not saved")?;

    assert_eq!(blob, r#"{"version":1,"lines":[]}"#);
    assert!(CartStore::new(store).is_empty());

    Ok(())
}

#[test]
fn legacy_array_blob_is_restored() -> TestResult {
    let dir = TempDir::new()?;
    let store = FileStore::new(storage_path(&dir));

    store.write(
        CART_STORAGE_KEY,
        r#"[{"product":{"id":"A1","name":"Air 1","price":100,"category":"running","releaseDate":"2024-01-01T00:00:00Z"},"quantity":2,"selectedSize":"10"}]"#,
    )?;

    let cart = CartStore::new(store);

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total_price(), Decimal::from(200));

    Ok(())
}

#[test]
fn unreadable_file_starts_empty_and_is_replaced() -> TestResult {
    let dir = TempDir::new()?;
    let path = storage_path(&dir);
    let catalog = catalog()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, "not json at all")?;

    let mut cart = CartStore::new(FileStore::new(&path));

    assert!(cart.is_empty());

    cart.add_item(product(&catalog, "vomero-18")?, Some("11"), 1);

    let cart = CartStore::new(FileStore::new(&path));

    assert_eq!(cart.total_item_count(), 1);

    Ok(())
}
