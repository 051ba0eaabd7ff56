//! Core identifiers and record types

use crate::error::{ErrorDetail, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Marketplace product identifier (the `nm` id)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Create a new ItemId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ItemId> for u64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seller (listing owner) identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub u64);

impl OwnerId {
    /// Create a new OwnerId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for OwnerId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sort order applied to a seller catalog listing
///
/// The known slugs are the ones the marketplace storefront offers. Anything else
/// is passed through verbatim (percent-encoded) as [`SortOrder::Custom`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// By popularity
    Popular,
    /// By rating
    Rate,
    /// Cheapest first (default)
    #[default]
    PriceUp,
    /// Most expensive first
    PriceDown,
    /// Newest first
    Newly,
    /// Best discount first
    Benefit,
    /// Any other slug accepted by the catalog service
    #[serde(untagged)]
    Custom(String),
}

impl SortOrder {
    /// Query-string slug for this sort order
    pub fn as_str(&self) -> &str {
        match self {
            SortOrder::Popular => "popular",
            SortOrder::Rate => "rate",
            SortOrder::PriceUp => "priceup",
            SortOrder::PriceDown => "pricedown",
            SortOrder::Newly => "newly",
            SortOrder::Benefit => "benefit",
            SortOrder::Custom(slug) => slug,
        }
    }
}

impl FromStr for SortOrder {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "popular" => SortOrder::Popular,
            "rate" => SortOrder::Rate,
            "priceup" => SortOrder::PriceUp,
            "pricedown" => SortOrder::PriceDown,
            "newly" => SortOrder::Newly,
            "benefit" => SortOrder::Benefit,
            other => SortOrder::Custom(other.to_string()),
        })
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full data for one product, merged from all of its sub-resources
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Product id
    pub id: ItemId,

    /// Static card document (`card.json`)
    pub main: serde_json::Value,

    /// Pricing and catalog detail
    pub detail: serde_json::Value,

    /// Historical prices; an empty object when the product has none published
    pub price_history: serde_json::Value,

    /// Order count (popularity)
    pub sold_count: serde_json::Value,

    /// Seller ownership document
    pub seller: serde_json::Value,

    /// Primary image URL
    pub image_link: String,
}

/// One raw page of a seller catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    /// Seller the page belongs to
    pub owner_id: OwnerId,
    /// 1-based page number
    pub page: u32,
    /// Sort order the page was requested with
    pub sort: SortOrder,
    /// Parsed response body
    pub payload: serde_json::Value,
}

impl ListingPage {
    /// Products on this page (`data.products`); empty if the payload has none
    pub fn products(&self) -> &[ListingItem] {
        self.payload
            .pointer("/data/products")
            .and_then(|v| v.as_array())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Consume the page, returning its products
    pub fn into_products(self) -> Vec<ListingItem> {
        match self.payload {
            serde_json::Value::Object(mut root) => match root.remove("data") {
                Some(serde_json::Value::Object(mut data)) => match data.remove("products") {
                    Some(serde_json::Value::Array(products)) => products,
                    _ => Vec::new(),
                },
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }
}

/// Short product entry as returned in a catalog listing
pub type ListingItem = serde_json::Value;

/// Item id of a listing entry, if it carries a numeric `id`
pub fn listing_item_id(item: &ListingItem) -> Option<ItemId> {
    item.get("id").and_then(|v| v.as_u64()).map(ItemId)
}

/// Seller profile payload
pub type OwnerInfo = serde_json::Value;

/// Per-id outcomes of a batch fetch, in input order
#[derive(Debug)]
pub struct BatchResult<T> {
    entries: Vec<(ItemId, Result<T>)>,
}

impl<T> BatchResult<T> {
    pub(crate) fn from_entries(entries: Vec<(ItemId, Result<T>)>) -> Self {
        Self { entries }
    }

    /// Number of entries (equals the number of requested ids)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the batch was empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(id, outcome)` pairs in input order
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Result<T>)> {
        self.entries.iter().map(|(id, r)| (*id, r))
    }

    /// Successful records in input order
    pub fn successes(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter_map(|(_, r)| r.as_ref().ok())
    }

    /// Failed ids with a serializable error description, in input order
    pub fn failures(&self) -> Vec<(ItemId, ErrorDetail)> {
        self.entries
            .iter()
            .filter_map(|(id, r)| r.as_ref().err().map(|e| (*id, ErrorDetail::from(e))))
            .collect()
    }

    /// Consume the batch, returning the ordered entries
    pub fn into_entries(self) -> Vec<(ItemId, Result<T>)> {
        self.entries
    }
}
