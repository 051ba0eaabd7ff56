//! Product fetcher: one request per sub-resource, merged into a single record.

use crate::endpoints::{EndpointCatalog, RequestTarget};
use crate::error::{Error, Result};
use crate::transport::{FetchFailure, Transport, fetch_json};
use crate::types::{ItemId, ItemRecord};
use std::sync::Arc;
use tracing::{debug, warn};

/// Retrieves full product records
#[derive(Clone)]
pub struct ItemFetcher {
    transport: Arc<dyn Transport>,
    catalog: Arc<EndpointCatalog>,
}

impl ItemFetcher {
    /// Create a fetcher over the given transport and endpoint catalog
    pub fn new(transport: Arc<dyn Transport>, catalog: Arc<EndpointCatalog>) -> Self {
        Self { transport, catalog }
    }

    /// Fetch every sub-resource of `id` and merge them into one record.
    ///
    /// The five requests run concurrently and all of them settle before the
    /// record is assembled. `main`, `detail`, `soldCount` and `seller` are
    /// required: if any is unavailable the whole fetch fails with
    /// [`Error::ItemNotFound`] naming the first failing label. A missing price
    /// history becomes an empty object.
    pub async fn fetch_item(&self, id: ItemId) -> Result<ItemRecord> {
        let endpoints = self.catalog.item(id)?;
        let transport = self.transport.as_ref();

        let (main, detail, price_history, sold_count, seller) = tokio::join!(
            fetch_json(transport, &endpoints.main),
            fetch_json(transport, &endpoints.detail),
            fetch_json(transport, &endpoints.price_history),
            fetch_json(transport, &endpoints.sold_count),
            fetch_json(transport, &endpoints.seller),
        );

        let price_history = price_history.unwrap_or_else(|failure| {
            debug!(
                item_id = %id,
                reason = %failure,
                "price history unavailable, using empty default"
            );
            serde_json::Value::Object(serde_json::Map::new())
        });

        Ok(ItemRecord {
            id,
            main: required(id, &endpoints.main, main)?,
            detail: required(id, &endpoints.detail, detail)?,
            price_history,
            sold_count: required(id, &endpoints.sold_count, sold_count)?,
            seller: required(id, &endpoints.seller, seller)?,
            image_link: endpoints.image.to_string(),
        })
    }
}

fn required(
    id: ItemId,
    target: &RequestTarget,
    outcome: std::result::Result<serde_json::Value, FetchFailure>,
) -> Result<serde_json::Value> {
    outcome.map_err(|failure| {
        warn!(
            item_id = %id,
            label = %target.label,
            reason = %failure,
            "required sub-resource unavailable"
        );
        Error::ItemNotFound {
            item_id: id,
            label: target.label,
        }
    })
}
