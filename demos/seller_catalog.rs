//! Seller catalog example
//!
//! Lists the first products of a seller, then fetches full data for each of them.
//!
//! Usage: `cargo run --example seller_catalog -- <seller_id> [max_items] [sort]`

use wb_catalog::{CatalogAggregator, Config, OwnerId, SortOrder, listing_item_id};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let owner_id = OwnerId(args.next().as_deref().unwrap_or("4123").parse()?);
    let max_items: usize = args.next().as_deref().unwrap_or("100").parse()?;
    let sort: SortOrder = args.next().as_deref().unwrap_or("priceup").parse()?;

    let aggregator = CatalogAggregator::new(Config::default())?;

    let info = aggregator.fetch_owner_info(owner_id).await?;
    println!("Seller: {}", serde_json::to_string_pretty(&info)?);

    // Short data straight from the listing
    let listing = aggregator
        .fetch_owner_catalog(owner_id, max_items, &sort)
        .await?;
    println!("✓ {} products listed", listing.len());

    // Full data for everything listed
    let ids: Vec<_> = listing.iter().filter_map(listing_item_id).collect();
    let batch = aggregator.fetch_items_batch(&ids).await;
    println!(
        "✓ {} full records, {} failed",
        batch.successes().count(),
        batch.failures().len()
    );
    for (id, error) in batch.failures() {
        eprintln!("  {id}: {}", error.code);
    }

    Ok(())
}
