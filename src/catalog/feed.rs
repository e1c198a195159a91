//! Product feed
//!
//! Fetches the remote rollup feed and turns it into [`Product`] records. The
//! feed is loosely structured, so every field has a fallback.

use jiff::Timestamp;
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::products::{Category, Product};

/// Default feed host.
pub const DEFAULT_FEED_BASE_URL: &str = "https://api.nike.com";

const ROLLUP_PATH: &str = "/product_feed/rollup_threads/v2";

const ROLLUP_QUERY: &[(&str, &str)] = &[
    ("filter", "marketplace(US)"),
    ("filter", "language(en)"),
    ("filter", "employeePrice(true)"),
    (
        "filter",
        "attributeIds(16633190-45e5-4830-a068-232ac7aea82c,0f64ecc7-d624-4e91-b171-b83a03dd8550)",
    ),
    ("anchor", "0"),
    ("consumerChannelId", "d9a5bc42-4b9c-4976-858a-f159cf99c647"),
    ("count", "24"),
];

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const UNKNOWN_ID: &str = "unknown";
const UNKNOWN_NAME: &str = "Unknown Product";
const NO_DESCRIPTION: &str = "No description available";
const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
const UNKNOWN_COLOR: &str = "Unknown Color";

/// Feed errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// The HTTP request failed or returned a non-success status
    #[error("failed to fetch products: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not a feed document
    #[error("failed to decode product feed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Raw feed document.
///
/// Every level may be missing or `null`; gaps are filled with fallbacks when
/// converting rather than failing the whole document.
#[derive(Debug, Default, Deserialize)]
pub struct FeedResponse {
    objects: Option<Vec<Option<FeedObject>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedObject {
    product_info: Option<Vec<Option<ProductInfo>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductInfo {
    merch_product: Option<MerchProduct>,
    product_content: Option<ProductContent>,
    merch_price: Option<MerchPrice>,
    image_urls: Option<ImageUrls>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MerchProduct {
    id: Option<String>,
    sport_tags: Option<Vec<Option<String>>>,
    commerce_start_date: Option<String>,
    available_sizes: Option<Vec<Option<String>>>,
    is_featured: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductContent {
    title: Option<String>,
    subtitle: Option<String>,
    colors: Option<Vec<Option<FeedColor>>>,
}

#[derive(Debug, Default, Deserialize)]
struct FeedColor {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MerchPrice {
    current_price: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageUrls {
    product_image_url: Option<String>,
}

impl FeedResponse {
    /// Parse a feed document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError::Decode`] if the text is not a feed document.
    pub fn from_json(json: &str) -> Result<Self, FeedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert into products, using `now` for missing release dates.
    ///
    /// `null` entries in the object list are skipped.
    pub fn into_products(self, now: Timestamp) -> Vec<Product> {
        self.objects
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .map(|object| transform(object, now))
            .collect()
    }
}

fn transform(object: FeedObject, now: Timestamp) -> Product {
    let info = object
        .product_info
        .and_then(|infos| infos.into_iter().next().flatten())
        .unwrap_or_default();
    let merch = info.merch_product.unwrap_or_default();
    let content = info.product_content.unwrap_or_default();

    let colors = content.colors.map_or_else(
        || vec![UNKNOWN_COLOR.to_string()],
        |colors| {
            colors
                .into_iter()
                .map(|color| {
                    color
                        .and_then(|color| color.name)
                        .unwrap_or_else(|| UNKNOWN_COLOR.to_string())
                })
                .collect()
        },
    );

    let sport_tag = merch
        .sport_tags
        .and_then(|tags| tags.into_iter().next().flatten());

    let release_date = merch
        .commerce_start_date
        .and_then(|date| date.parse::<Timestamp>().ok())
        .unwrap_or(now);

    Product {
        id: merch.id.unwrap_or_else(|| UNKNOWN_ID.to_string()),
        name: content.title.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        description: content
            .subtitle
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        price: info
            .merch_price
            .and_then(|price| price.current_price)
            .unwrap_or(Decimal::ZERO),
        category: Category::from_sport_tag(sport_tag.as_deref()),
        image: info
            .image_urls
            .and_then(|urls| urls.product_image_url)
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        release_date,
        colors,
        sizes: merch
            .available_sizes
            .map(|sizes| sizes.into_iter().flatten().collect())
            .unwrap_or_default(),
        featured: merch.is_featured.unwrap_or(false),
    }
}

/// HTTP client for the product feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    base_url: String,
}

impl FeedClient {
    /// Create a client for the feed served at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch every product in the feed.
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError`] if the request fails, the server answers with a
    /// non-success status, or the body is not a feed document.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, FeedError> {
        let body = self
            .client
            .get(format!("{}{ROLLUP_PATH}", self.base_url))
            .query(ROLLUP_QUERY)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let products = FeedResponse::from_json(&body)?.into_products(Timestamp::now());

        debug!(count = products.len(), "fetched product feed");

        Ok(products)
    }

    /// Fetch the product with the given identifier, if the feed has it.
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError`] if the feed cannot be fetched.
    pub async fn fetch_product_by_id(&self, id: &str) -> Result<Option<Product>, FeedError> {
        let products = self.fetch_products().await?;

        Ok(products.into_iter().find(|product| product.id == id))
    }
}
