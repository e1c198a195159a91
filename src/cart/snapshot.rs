//! Persisted cart format
//!
//! Carts are stored as `{"version": 1, "lines": [...]}`. Older blobs were a
//! bare array of lines and are still accepted on read. Each line is
//! `{"product": {...}, "quantity": n, "selectedSize": "..."}` with the product
//! price written as a JSON number.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::line::{CartLine, LineKey};

/// Current persisted format version.
pub const CART_FORMAT_VERSION: u32 = 1;

/// Reasons a stored cart blob cannot be used.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The blob is not valid JSON or has the wrong shape
    #[error("cart blob could not be parsed: {0}")]
    Json(#[from] serde_json::Error),

    /// The blob was written by an unknown format version
    #[error("unsupported cart format version {0}")]
    UnsupportedVersion(u32),

    /// A line has a quantity of zero
    #[error("line {0} has a zero quantity")]
    ZeroQuantity(usize),

    /// Two lines share the same product and size
    #[error("line {index} duplicates {key}")]
    DuplicateLine {
        /// Position of the second occurrence
        index: usize,
        /// The repeated key
        key: LineKey,
    },
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    lines: &'a [CartLine],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCart {
    Versioned { version: u32, lines: Vec<CartLine> },
    Legacy(Vec<CartLine>),
}

/// Serialize lines into the current format.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization fails.
pub fn encode(lines: &[CartLine]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SnapshotRef {
        version: CART_FORMAT_VERSION,
        lines,
    })
}

/// Parse a stored blob back into lines, checking the cart invariants.
///
/// # Errors
///
/// Returns a [`SnapshotError`] if the blob is unparsable, from an unknown
/// version, or holds lines no cart could contain.
pub fn decode(blob: &str) -> Result<Vec<CartLine>, SnapshotError> {
    let lines = match serde_json::from_str::<StoredCart>(blob)? {
        StoredCart::Versioned { version, lines } if version == CART_FORMAT_VERSION => lines,
        StoredCart::Versioned { version, .. } => {
            return Err(SnapshotError::UnsupportedVersion(version));
        }
        StoredCart::Legacy(lines) => lines,
    };

    let mut seen = FxHashSet::default();

    for (index, line) in lines.iter().enumerate() {
        if line.quantity() == 0 {
            return Err(SnapshotError::ZeroQuantity(index));
        }

        let key = line.key();

        if !seen.insert(key.clone()) {
            return Err(SnapshotError::DuplicateLine { index, key });
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::products::{Category, Product};

    use super::*;

    fn line(id: &str, quantity: u32, size: Option<&str>) -> CartLine {
        CartLine::new(
            Product {
                id: id.to_string(),
                name: "Pegasus".to_string(),
                description: "Daily trainer".to_string(),
                price: Decimal::from(100),
                category: Category::Running,
                image: "/pegasus.png".to_string(),
                release_date: Timestamp::UNIX_EPOCH,
                colors: vec!["Black".to_string()],
                sizes: vec!["10".to_string()],
                featured: true,
            },
            quantity,
            size,
        )
    }

    #[test]
    fn encode_then_decode_preserves_lines() -> TestResult {
        let lines = vec![line("A1", 2, Some("10")), line("A1", 1, None)];

        let blob = encode(&lines)?;

        assert!(blob.starts_with(r#"{"version":1,"#), "unexpected blob: {blob}");
        assert!(!blob.contains(r#""price":""#), "price written as a string: {blob}");
        assert_eq!(decode(&blob)?, lines);

        Ok(())
    }

    #[test]
    fn decode_accepts_legacy_array() -> TestResult {
        let blob = r#"[{
            "product": {
                "id": "X",
                "name": "Blazer",
                "description": "",
                "price": 50,
                "category": "lifestyle",
                "image": "/blazer.png",
                "releaseDate": "2024-01-01T00:00:00.000Z",
                "colors": ["White"],
                "sizes": ["M"],
                "featured": false
            },
            "quantity": 2,
            "selectedSize": "M"
        }]"#;

        let lines = decode(blob)?;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(CartLine::quantity), Some(2));
        assert_eq!(lines.first().and_then(CartLine::selected_size), Some("M"));

        Ok(())
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let result = decode(r#"{"version":7,"lines":[]}"#);

        assert!(matches!(result, Err(SnapshotError::UnsupportedVersion(7))));
    }

    #[test]
    fn decode_rejects_zero_quantity() -> TestResult {
        let mut bad = line("A1", 1, None);
        bad.set_quantity(0);

        let blob = encode(&[bad])?;

        assert!(matches!(decode(&blob), Err(SnapshotError::ZeroQuantity(0))));

        Ok(())
    }

    #[test]
    fn decode_rejects_duplicate_keys() -> TestResult {
        let blob = encode(&[line("A1", 1, Some("10")), line("A1", 3, Some("10"))])?;

        assert!(matches!(
            decode(&blob),
            Err(SnapshotError::DuplicateLine { index: 1, .. })
        ));

        Ok(())
    }

    #[test]
    fn decode_rejects_negative_quantity_and_garbage() {
        assert!(matches!(decode("{not json"), Err(SnapshotError::Json(_))));
        assert!(matches!(
            decode(r#"[{"product":{},"quantity":-1}]"#),
            Err(SnapshotError::Json(_))
        ));
    }
}
