//! Storage shard lookup for product static assets.
//!
//! Product documents and images live on numbered `basket-NN` hosts. The host is
//! picked by the product's volume (`id / 100000`) from a fixed range table; the
//! volume and part (`id / 1000`) also appear as path segments.

use crate::types::ItemId;

/// Inclusive upper volume bound of each basket host, in ascending order.
/// Volumes above the last bound fall through to [`OVERFLOW_HOST`].
const BASKET_RANGES: [(u64, &str); 13] = [
    (143, "01"),
    (287, "02"),
    (431, "03"),
    (719, "04"),
    (1007, "05"),
    (1061, "06"),
    (1115, "07"),
    (1169, "08"),
    (1313, "09"),
    (1601, "10"),
    (1655, "11"),
    (1919, "12"),
    (2045, "13"),
];

const OVERFLOW_HOST: &str = "14";

/// Storage location of one product
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shard {
    /// Two-digit basket host number
    pub host_suffix: &'static str,
    /// `id / 100000`
    pub volume: u64,
    /// `id / 1000`
    pub part: u64,
}

impl Shard {
    /// Locate the shard holding `id`
    pub fn locate(id: ItemId) -> Self {
        let volume = id.get() / 100_000;
        Self {
            host_suffix: host_suffix_for_volume(volume),
            volume,
            part: id.get() / 1_000,
        }
    }

    /// Host name of the basket server, e.g. `basket-05.wb.ru`
    pub fn basket_host(&self, domain: &str) -> String {
        format!("basket-{}.{}", self.host_suffix, domain)
    }

    /// Path prefix of the product's directory, e.g. `/vol80/part8056/8056582`
    pub fn item_path(&self, id: ItemId) -> String {
        format!("/vol{}/part{}/{}", self.volume, self.part, id)
    }
}

fn host_suffix_for_volume(volume: u64) -> &'static str {
    BASKET_RANGES
        .iter()
        .find(|(upper, _)| volume <= *upper)
        .map(|(_, suffix)| *suffix)
        .unwrap_or(OVERFLOW_HOST)
}
