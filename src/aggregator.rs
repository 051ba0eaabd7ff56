//! Aggregation facade for batches of products and whole seller catalogs.
//!
//! [`CatalogAggregator`] owns the ticket pool that caps how many products are
//! fetched at once. A ticket is taken before a product's fan-out starts and
//! returned once all of its sub-requests have settled, so the cap applies to
//! products, not to individual HTTP requests.

use crate::config::Config;
use crate::endpoints::EndpointCatalog;
use crate::error::{Error, Result};
use crate::item::ItemFetcher;
use crate::listing::ListingFetcher;
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    BatchResult, ItemId, ItemRecord, ListingItem, ListingPage, OwnerId, OwnerInfo, SortOrder,
    listing_item_id,
};
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// The marketplace exposes at most this many products of one seller
pub const OWNER_CATALOG_LIMIT: usize = 9999;

/// Products per seller catalog page
pub const LISTING_PAGE_SIZE: usize = 100;

/// Entry point for all catalog retrieval
///
/// Cloning is cheap; clones share the ticket pool and shutdown state.
#[derive(Clone)]
pub struct CatalogAggregator {
    items: ItemFetcher,
    listings: ListingFetcher,
    tickets: Arc<Semaphore>,
    concurrency: usize,
    cancel_token: CancellationToken,
}

impl CatalogAggregator {
    /// Create an aggregator talking to the marketplace over HTTP
    ///
    /// # Errors
    /// Returns [`Error::Config`] for an invalid configuration, or an error if the
    /// HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let transport = Arc::new(HttpTransport::new(&config.http)?);
        Self::with_transport(config, transport)
    }

    /// Create an aggregator over a caller-supplied transport
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let catalog = Arc::new(EndpointCatalog::new(&config.hosts)?);

        Ok(Self {
            items: ItemFetcher::new(Arc::clone(&transport), Arc::clone(&catalog)),
            listings: ListingFetcher::new(transport, catalog),
            tickets: Arc::new(Semaphore::new(config.concurrency)),
            concurrency: config.concurrency,
            cancel_token: CancellationToken::new(),
        })
    }

    /// Maximum number of products fetched at once
    pub fn concurrency_limit(&self) -> usize {
        self.concurrency
    }

    /// Tickets currently free
    pub fn available_tickets(&self) -> usize {
        self.tickets.available_permits()
    }

    /// Fetch one product's full record
    pub async fn fetch_item(&self, id: ItemId) -> Result<ItemRecord> {
        self.ensure_running()?;
        self.fetch_item_with_ticket(id).await
    }

    /// Fetch full records for every id.
    ///
    /// All ids are started together and each waits for a ticket. The result has
    /// one entry per input id, in input order; a failed id does not affect the
    /// others.
    pub async fn fetch_items_batch(&self, ids: &[ItemId]) -> BatchResult<ItemRecord> {
        info!(count = ids.len(), "fetching item batch");

        if self.cancel_token.is_cancelled() {
            return BatchResult::from_entries(
                ids.iter().map(|id| (*id, Err(Error::ShuttingDown))).collect(),
            );
        }

        let mut pending: FuturesUnordered<_> = ids
            .iter()
            .copied()
            .enumerate()
            .map(|(index, id)| async move { (index, self.fetch_item_with_ticket(id).await) })
            .collect();

        let mut slots: Vec<Option<Result<ItemRecord>>> = (0..ids.len()).map(|_| None).collect();
        while let Some((index, outcome)) = pending.next().await {
            slots[index] = Some(outcome);
        }

        let entries: Vec<_> = ids
            .iter()
            .copied()
            .zip(slots)
            .map(|(id, slot)| {
                let outcome = slot.unwrap_or_else(|| {
                    Err(Error::Other(format!("no outcome recorded for item {id}")))
                });
                (id, outcome)
            })
            .collect();

        let failed = entries.iter().filter(|(_, r)| r.is_err()).count();
        info!(count = entries.len(), failed, "item batch finished");

        BatchResult::from_entries(entries)
    }

    /// List up to `max_items` products of a seller, in catalog order.
    ///
    /// Fetches pages `1..=max_items / 100 + 1` concurrently, concatenates them in
    /// page order and truncates to `max_items`. Pages are not subject to the
    /// ticket pool.
    ///
    /// # Errors
    /// [`Error::Validation`] if `max_items` exceeds [`OWNER_CATALOG_LIMIT`] (no
    /// request is made), [`Error::OwnerNotFound`] if any page is unavailable.
    pub async fn fetch_owner_catalog(
        &self,
        owner_id: OwnerId,
        max_items: usize,
        sort: &SortOrder,
    ) -> Result<Vec<ListingItem>> {
        if max_items > OWNER_CATALOG_LIMIT {
            return Err(Error::Validation {
                message: format!(
                    "max_items must not exceed {OWNER_CATALOG_LIMIT}, got {max_items}"
                ),
                field: Some("max_items".to_string()),
            });
        }
        self.ensure_running()?;

        let page_count = page_count(max_items);
        debug!(owner_id = %owner_id, page_count, sort = %sort, "fetching seller catalog");

        let pages = futures::future::try_join_all(
            (1..=page_count).map(|page| self.listings.fetch_page(owner_id, page, sort)),
        );
        let pages = tokio::select! {
            biased;
            _ = self.cancel_token.cancelled() => return Err(Error::Cancelled),
            pages = pages => pages?,
        };

        let mut items: Vec<ListingItem> = pages
            .into_iter()
            .flat_map(ListingPage::into_products)
            .collect();
        items.truncate(max_items);

        info!(owner_id = %owner_id, count = items.len(), "seller catalog fetched");
        Ok(items)
    }

    /// List a seller's products, then fetch the full record of each.
    ///
    /// Listing entries without a numeric `id` are skipped.
    pub async fn fetch_owner_catalog_full(
        &self,
        owner_id: OwnerId,
        max_items: usize,
        sort: &SortOrder,
    ) -> Result<BatchResult<ItemRecord>> {
        let listing = self.fetch_owner_catalog(owner_id, max_items, sort).await?;

        let ids: Vec<ItemId> = listing
            .iter()
            .filter_map(|entry| {
                let id = listing_item_id(entry);
                if id.is_none() {
                    warn!(owner_id = %owner_id, "skipping listing entry without an item id");
                }
                id
            })
            .collect();

        Ok(self.fetch_items_batch(&ids).await)
    }

    /// Fetch a seller's profile
    pub async fn fetch_owner_info(&self, owner_id: OwnerId) -> Result<OwnerInfo> {
        self.ensure_running()?;
        tokio::select! {
            biased;
            _ = self.cancel_token.cancelled() => Err(Error::Cancelled),
            info = self.listings.fetch_owner_info(owner_id) => info,
        }
    }

    /// Stop accepting work and abandon everything in flight.
    ///
    /// Pending fetches resolve to [`Error::Cancelled`] and their outstanding
    /// requests are dropped. Later calls fail with [`Error::ShuttingDown`].
    pub fn shutdown(&self) {
        info!("catalog aggregator shutting down");
        self.cancel_token.cancel();
        self.tickets.close();
    }

    /// True once [`shutdown`](Self::shutdown) has been called
    pub fn is_shut_down(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    fn ensure_running(&self) -> Result<()> {
        if self.cancel_token.is_cancelled() {
            return Err(Error::ShuttingDown);
        }
        Ok(())
    }

    async fn fetch_item_with_ticket(&self, id: ItemId) -> Result<ItemRecord> {
        // Closed only by shutdown
        let _ticket = self.tickets.acquire().await.map_err(|_| Error::Cancelled)?;

        tokio::select! {
            biased;
            _ = self.cancel_token.cancelled() => {
                debug!(item_id = %id, "item fetch cancelled");
                Err(Error::Cancelled)
            }
            record = self.items.fetch_item(id) => record,
        }
    }
}

fn page_count(max_items: usize) -> u32 {
    // max_items is bounded by OWNER_CATALOG_LIMIT, so this is at most 100
    u32::try_from(max_items / LISTING_PAGE_SIZE + 1).unwrap_or(u32::MAX)
}
