//! Seller fetcher for catalog pages and profiles.

use crate::endpoints::{EndpointCatalog, RequestTarget};
use crate::error::{Error, Result};
use crate::transport::{Transport, fetch_json};
use crate::types::{ListingPage, OwnerId, OwnerInfo, SortOrder};
use std::sync::Arc;
use tracing::warn;

/// Retrieves seller catalog pages and seller profiles
#[derive(Clone)]
pub struct ListingFetcher {
    transport: Arc<dyn Transport>,
    catalog: Arc<EndpointCatalog>,
}

impl ListingFetcher {
    /// Create a fetcher over the given transport and endpoint catalog
    pub fn new(transport: Arc<dyn Transport>, catalog: Arc<EndpointCatalog>) -> Self {
        Self { transport, catalog }
    }

    /// Fetch one page (1-based) of a seller's catalog
    pub async fn fetch_page(
        &self,
        owner_id: OwnerId,
        page: u32,
        sort: &SortOrder,
    ) -> Result<ListingPage> {
        let target = self.catalog.listing_page(owner_id, page, sort)?;
        let payload = self.fetch(owner_id, &target).await?;
        Ok(ListingPage {
            owner_id,
            page,
            sort: sort.clone(),
            payload,
        })
    }

    /// Fetch a seller's profile
    pub async fn fetch_owner_info(&self, owner_id: OwnerId) -> Result<OwnerInfo> {
        let target = self.catalog.owner_info(owner_id)?;
        self.fetch(owner_id, &target).await
    }

    async fn fetch(&self, owner_id: OwnerId, target: &RequestTarget) -> Result<serde_json::Value> {
        fetch_json(self.transport.as_ref(), target)
            .await
            .map_err(|failure| {
                warn!(
                    owner_id = %owner_id,
                    label = %target.label,
                    reason = %failure,
                    "seller endpoint unavailable"
                );
                Error::OwnerNotFound {
                    owner_id,
                    label: target.label,
                }
            })
    }
}
