//! Common test utilities for wb-catalog HTTP tests

#![allow(dead_code)]

use serde_json::json;
use std::time::Duration;
use wb_catalog::{CatalogAggregator, Config, HostsConfig, ItemId, Shard};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Aggregator routing every marketplace host to `server`
pub fn aggregator_for(server: &MockServer, concurrency: usize) -> CatalogAggregator {
    let config = Config {
        concurrency,
        hosts: HostsConfig {
            base_url_override: Some(server.uri()),
            ..Default::default()
        },
        ..Default::default()
    };
    CatalogAggregator::new(config).expect("valid test config")
}

/// Path prefix of a product's basket directory
pub fn item_dir(id: ItemId) -> String {
    Shard::locate(id).item_path(id)
}

/// Status and delay for each sub-resource of a mocked product
pub struct ItemMock {
    pub main: u16,
    pub detail: u16,
    pub price_history: u16,
    pub sold_count: u16,
    pub seller: u16,
    pub delay: Duration,
}

impl Default for ItemMock {
    fn default() -> Self {
        Self {
            main: 200,
            detail: 200,
            price_history: 200,
            sold_count: 200,
            seller: 200,
            delay: Duration::ZERO,
        }
    }
}

fn reply(status: u16, body: serde_json::Value, delay: Duration) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .set_body_json(body)
        .set_delay(delay)
}

/// Mount every sub-resource of `id`. Bodies are `{"label": ..., "id": ...}`.
pub async fn mount_item(server: &MockServer, id: ItemId, mock: ItemMock) {
    let dir = item_dir(id);
    let nm = id.to_string();
    let body = |label: &str| json!({"label": label, "id": id.get()});

    Mock::given(method("GET"))
        .and(path(format!("{dir}/info/ru/card.json")))
        .respond_with(reply(mock.main, body("main"), mock.delay))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/detail"))
        .and(query_param("nm", nm.as_str()))
        .and(query_param("curr", "rub"))
        .respond_with(reply(mock.detail, body("detail"), mock.delay))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{dir}/info/price-history.json")))
        .respond_with(reply(mock.price_history, body("priceHistory"), mock.delay))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/by-nm/"))
        .and(query_param("nm", nm.as_str()))
        .respond_with(reply(mock.sold_count, body("soldCount"), mock.delay))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{dir}/info/sellers.json")))
        .respond_with(reply(mock.seller, body("seller"), mock.delay))
        .mount(server)
        .await;
}

/// A listing page of `count` products with ids `page * 1000 + i`
pub fn page_body(page: u32, count: u64) -> serde_json::Value {
    let products: Vec<_> = (0..count)
        .map(|i| json!({"id": u64::from(page) * 1000 + i, "name": format!("p{page}-{i}")}))
        .collect();
    json!({"data": {"products": products}})
}
