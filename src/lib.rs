//! # wb-catalog
//!
//! Concurrent catalog retrieval for the Wildberries marketplace.
//!
//! ## Design Philosophy
//!
//! wb-catalog is designed to be:
//! - **Library-first** - No CLI, purely a Rust crate for embedding
//! - **Bounded** - A single ticket pool caps how many products are fetched at once
//! - **Order-preserving** - Batch results line up with the ids that were asked for
//! - **Transport-agnostic** - Retrieval logic talks to a [`Transport`] trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use wb_catalog::{CatalogAggregator, Config, ItemId, OwnerId, SortOrder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let aggregator = CatalogAggregator::new(Config::default())?;
//!
//!     // Full records for a handful of products
//!     let ids = [ItemId(15398837), ItemId(49903424), ItemId(8056582)];
//!     let batch = aggregator.fetch_items_batch(&ids).await;
//!     for (id, outcome) in batch.iter() {
//!         match outcome {
//!             Ok(record) => println!("{id}: {}", record.image_link),
//!             Err(e) => println!("{id}: {}", e.error_code()),
//!         }
//!     }
//!
//!     // First 250 products of a seller, cheapest first
//!     let listing = aggregator
//!         .fetch_owner_catalog(OwnerId(4123), 250, &SortOrder::PriceUp)
//!         .await?;
//!     println!("{} products", listing.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Batch and seller-catalog orchestration
pub mod aggregator;
/// Configuration types
pub mod config;
/// Request target construction
pub mod endpoints;
/// Error types
pub mod error;
/// Product fetcher
pub mod item;
/// Seller fetcher
pub mod listing;
/// Storage shard lookup
pub mod shard;
/// HTTP transport seam
pub mod transport;
/// Core identifiers and records
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use aggregator::{CatalogAggregator, LISTING_PAGE_SIZE, OWNER_CATALOG_LIMIT};
pub use config::{Config, HostsConfig, HttpConfig};
pub use endpoints::{EndpointCatalog, EndpointLabel, ItemEndpoints, RequestTarget};
pub use error::{Error, ErrorDetail, Result};
pub use item::ItemFetcher;
pub use listing::ListingFetcher;
pub use shard::Shard;
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use types::{
    BatchResult, ItemId, ItemRecord, ListingItem, ListingPage, OwnerId, OwnerInfo, SortOrder,
    listing_item_id,
};
