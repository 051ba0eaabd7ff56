//! Configuration types for wb-catalog

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of products fetched concurrently
pub const DEFAULT_CONCURRENCY: usize = 200;

/// HTTP client behaviour
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout, covering connect through body (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// TCP connect timeout (default: 10 seconds)
    #[serde(default = "default_connect_timeout", with = "duration_serde")]
    pub connect_timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Marketplace host names
///
/// The defaults point at the production marketplace. `base_url_override`
/// replaces scheme, host and port of every request target while leaving paths
/// and queries untouched, which lets a proxy or a local mock server stand in
/// for all hosts at once.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HostsConfig {
    /// Domain under which the `basket-NN` storage hosts live
    #[serde(default = "default_basket_domain")]
    pub basket_domain: String,

    /// Pricing/catalog aggregator host
    #[serde(default = "default_card_host")]
    pub card_host: String,

    /// Order-count (popularity) service host
    #[serde(default = "default_order_count_host")]
    pub order_count_host: String,

    /// Seller catalog search host
    #[serde(default = "default_catalog_host")]
    pub catalog_host: String,

    /// Seller profile host
    #[serde(default = "default_shipment_host")]
    pub shipment_host: String,

    /// Route every request through this origin instead (e.g. "http://127.0.0.1:8080")
    #[serde(default)]
    pub base_url_override: Option<String>,
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            basket_domain: default_basket_domain(),
            card_host: default_card_host(),
            order_count_host: default_order_count_host(),
            catalog_host: default_catalog_host(),
            shipment_host: default_shipment_host(),
            base_url_override: None,
        }
    }
}

/// Main configuration for [`CatalogAggregator`](crate::CatalogAggregator)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of products being fetched at once (default: 200)
    ///
    /// Each product in flight issues five requests, so the number of open
    /// requests can reach five times this value.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Marketplace hosts
    #[serde(default)]
    pub hosts: HostsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            http: HttpConfig::default(),
            hosts: HostsConfig::default(),
        }
    }
}

impl Config {
    /// Check the configuration for values the aggregator cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(Error::Config {
                message: "concurrency must be at least 1".to_string(),
                key: Some("concurrency".to_string()),
            });
        }

        if self.http.request_timeout.is_zero() {
            return Err(Error::Config {
                message: "request_timeout must be greater than zero".to_string(),
                key: Some("http.request_timeout".to_string()),
            });
        }

        if let Some(base) = &self.hosts.base_url_override {
            let parsed = url::Url::parse(base).map_err(|e| Error::Config {
                message: format!("invalid base_url_override {base:?}: {e}"),
                key: Some("hosts.base_url_override".to_string()),
            })?;
            if parsed.cannot_be_a_base() {
                return Err(Error::Config {
                    message: format!("base_url_override {base:?} cannot carry a path"),
                    key: Some("hosts.base_url_override".to_string()),
                });
            }
        }

        Ok(())
    }
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    concat!("wb-catalog/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_basket_domain() -> String {
    "wb.ru".to_string()
}

fn default_card_host() -> String {
    "card.wb.ru".to_string()
}

fn default_order_count_host() -> String {
    "product-order-qnt.wildberries.ru".to_string()
}

fn default_catalog_host() -> String {
    "catalog.wb.ru".to_string()
}

fn default_shipment_host() -> String {
    "suppliers-shipment.wildberries.ru".to_string()
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_marketplace_hosts() {
        let config = Config::default();
        assert_eq!(config.concurrency, 200);
        assert_eq!(config.http.request_timeout, Duration::from_secs(30));
        assert_eq!(config.hosts.basket_domain, "wb.ru");
        assert_eq!(config.hosts.shipment_host, "suppliers-shipment.wildberries.ru");
        assert!(config.hosts.base_url_override.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn empty_json_deserializes_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.hosts.card_host, "card.wb.ru");
    }

    #[test]
    fn timeouts_serialize_as_seconds() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["http"]["request_timeout"], 30);

        let config: Config =
            serde_json::from_str(r#"{"concurrency": 8, "http": {"request_timeout": 5}}"#).unwrap();
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.http.request_timeout, Duration::from_secs(5));
        assert_eq!(config.http.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let config = Config {
            concurrency: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config { key: Some(ref k), .. } if k == "concurrency"));
    }

    #[test]
    fn zero_request_timeout_is_rejected() {
        let mut config = Config::default();
        config.http.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_base_url_override_is_rejected() {
        let mut config = Config::default();
        config.hosts.base_url_override = Some("not a url".to_string());
        assert!(config.validate().is_err());

        config.hosts.base_url_override = Some("mailto:ops@example.com".to_string());
        assert!(config.validate().is_err());

        config.hosts.base_url_override = Some("http://127.0.0.1:9000".to_string());
        config.validate().unwrap();
    }
}
