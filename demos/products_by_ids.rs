//! Full product data by ids
//!
//! Fetches every sub-resource of a few products and prints the merged records.
//! Pass product ids as arguments, or run without arguments for a default set.

use wb_catalog::{CatalogAggregator, Config, ItemId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let mut ids: Vec<ItemId> = std::env::args()
        .skip(1)
        .map(|arg| arg.parse::<u64>().map(ItemId))
        .collect::<Result<_, _>>()?;
    if ids.is_empty() {
        ids = vec![ItemId(15398837), ItemId(49903424), ItemId(8056582)];
    }

    let aggregator = CatalogAggregator::new(Config::default())?;
    let batch = aggregator.fetch_items_batch(&ids).await;

    for (id, outcome) in batch.iter() {
        match outcome {
            Ok(record) => println!("{}", serde_json::to_string_pretty(record)?),
            Err(e) => eprintln!("✗ {id}: {e}"),
        }
    }

    Ok(())
}
