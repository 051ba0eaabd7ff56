//! Request targets for product and seller endpoints.
//!
//! Everything here is pure URL construction; no request is made.

use crate::config::HostsConfig;
use crate::error::{Error, Result};
use crate::shard::Shard;
use crate::types::{ItemId, OwnerId, SortOrder};
use serde::{Deserialize, Serialize};
use url::Url;

/// Region list the storefront sends with pricing and catalog queries
pub const REGIONS: &str = "80,38,83,4,64,33,68,70,30,40,86,75,69,1,31,66,22,110,48,71,114";

/// Delivery destination used for catalog listings
pub const CATALOG_DEST: &str = "-1257786";

/// Header required by the seller profile endpoint
const SHIPMENT_HEADERS: &[(&str, &str)] = &[("x-client-name", "site")];

/// Name of a product sub-resource or seller endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndpointLabel {
    /// Static product card
    Main,
    /// Pricing/catalog detail
    Detail,
    /// Historical prices
    PriceHistory,
    /// Order count
    SoldCount,
    /// Seller ownership
    Seller,
    /// Primary image
    Image,
    /// Seller catalog page
    Products,
    /// Seller profile
    Info,
}

impl EndpointLabel {
    /// Stable label name
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointLabel::Main => "main",
            EndpointLabel::Detail => "detail",
            EndpointLabel::PriceHistory => "priceHistory",
            EndpointLabel::SoldCount => "soldCount",
            EndpointLabel::Seller => "seller",
            EndpointLabel::Image => "image",
            EndpointLabel::Products => "products",
            EndpointLabel::Info => "info",
        }
    }
}

impl std::fmt::Display for EndpointLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single GET request description
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestTarget {
    /// Which endpoint this is
    pub label: EndpointLabel,
    /// Fully-formed URL
    pub url: Url,
    /// Extra headers to send
    pub headers: &'static [(&'static str, &'static str)],
}

/// All targets for one product
#[derive(Clone, Debug)]
pub struct ItemEndpoints {
    /// Product id
    pub id: ItemId,
    /// Storage shard the product lives on
    pub shard: Shard,
    /// `info/ru/card.json`
    pub main: RequestTarget,
    /// `cards/detail`
    pub detail: RequestTarget,
    /// `info/price-history.json`
    pub price_history: RequestTarget,
    /// `v2/by-nm`
    pub sold_count: RequestTarget,
    /// `info/sellers.json`
    pub seller: RequestTarget,
    /// Primary image; never requested
    pub image: Url,
}

/// Builds request targets against the configured hosts
#[derive(Clone, Debug)]
pub struct EndpointCatalog {
    hosts: HostsConfig,
}

impl EndpointCatalog {
    /// Create a catalog for the given hosts
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `base_url_override` is not a valid base URL.
    pub fn new(hosts: &HostsConfig) -> Result<Self> {
        if let Some(base) = &hosts.base_url_override {
            Url::parse(base).map_err(|e| Error::Config {
                message: format!("invalid base_url_override {base:?}: {e}"),
                key: Some("hosts.base_url_override".to_string()),
            })?;
        }
        Ok(Self {
            hosts: hosts.clone(),
        })
    }

    /// Targets for every sub-resource of a product
    pub fn item(&self, id: ItemId) -> Result<ItemEndpoints> {
        let shard = Shard::locate(id);
        let basket = shard.basket_host(&self.hosts.basket_domain);
        let item_path = shard.item_path(id);

        let main = self.target(
            EndpointLabel::Main,
            &basket,
            &format!("{item_path}/info/ru/card.json"),
            &[],
        )?;
        let detail = self.target(
            EndpointLabel::Detail,
            &self.hosts.card_host,
            &format!("/cards/detail?appType=1&curr=rub&regions={REGIONS}&spp=0&nm={id}"),
            &[],
        )?;
        let price_history = self.target(
            EndpointLabel::PriceHistory,
            &basket,
            &format!("{item_path}/info/price-history.json"),
            &[],
        )?;
        let sold_count = self.target(
            EndpointLabel::SoldCount,
            &self.hosts.order_count_host,
            &format!("/v2/by-nm/?nm={id}"),
            &[],
        )?;
        let seller = self.target(
            EndpointLabel::Seller,
            &basket,
            &format!("{item_path}/info/sellers.json"),
            &[],
        )?;
        let image = self
            .target(
                EndpointLabel::Image,
                &basket,
                &format!("{item_path}/images/big/1.webp"),
                &[],
            )?
            .url;

        Ok(ItemEndpoints {
            id,
            shard,
            main,
            detail,
            price_history,
            sold_count,
            seller,
            image,
        })
    }

    /// Target for one page of a seller's catalog
    pub fn listing_page(
        &self,
        owner_id: OwnerId,
        page: u32,
        sort: &SortOrder,
    ) -> Result<RequestTarget> {
        let sort = urlencoding::encode(sort.as_str());
        self.target(
            EndpointLabel::Products,
            &self.hosts.catalog_host,
            &format!(
                "/sellers/catalog?appType=1&curr=rub&dest={CATALOG_DEST}&regions={REGIONS}\
                 &sort={sort}&spp=0&supplier={owner_id}&page={page}"
            ),
            &[],
        )
    }

    /// Target for a seller's profile
    pub fn owner_info(&self, owner_id: OwnerId) -> Result<RequestTarget> {
        self.target(
            EndpointLabel::Info,
            &self.hosts.shipment_host,
            &format!("/api/v1/suppliers/{owner_id}"),
            SHIPMENT_HEADERS,
        )
    }

    fn target(
        &self,
        label: EndpointLabel,
        host: &str,
        path_and_query: &str,
        headers: &'static [(&'static str, &'static str)],
    ) -> Result<RequestTarget> {
        let raw = match &self.hosts.base_url_override {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), path_and_query),
            None => format!("https://{host}{path_and_query}"),
        };
        let url = Url::parse(&raw).map_err(|e| Error::Config {
            message: format!("cannot build {label} URL {raw:?}: {e}"),
            key: Some("hosts".to_string()),
        })?;
        Ok(RequestTarget {
            label,
            url,
            headers,
        })
    }
}
