//! FoodieDelight client
//!
//! Demo binary for the restaurant directory client: wires the API
//! client to the server-state cache, fetches the restaurant list and
//! shows cache hits and invalidation on the console.

use anyhow::Context;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use foodie_api::ApiClient;
use foodie_cache::CollectionCache;
use foodie_core::Collection;
use foodie_model::{Restaurant, restaurant_by_id};

#[tokio::main]
async fn main() {
    // Initialize logging
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .pretty()
        .init();

    // Print startup banner
    println!();
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║                                                           ║");
    println!("║   🍽  FoodieDelight client                                 ║");
    println!("║   Restaurant directory sync & forms                      ║");
    println!("║                                                           ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    // A network failure is a normal outcome for the demo, not a crash.
    if let Err(err) = run().await {
        warn!(error = ?err, "demo run did not complete");
    }
}

async fn run() -> anyhow::Result<()> {
    let client = ApiClient::new();
    let restaurants: CollectionCache<Vec<Restaurant>> =
        CollectionCache::new(Collection::Restaurants);

    info!(base_url = client.base_url(), "fetching restaurant list");
    let listing = restaurants
        .read(None, || client.list_restaurants())
        .await
        .context("listing restaurants")?;

    info!(count = listing.len(), "restaurant list loaded");
    for restaurant in &listing {
        println!(
            "  {} - {} ({})",
            restaurant.name,
            restaurant.location.display_line(),
            restaurant.categories.join(", "),
        );
    }

    // Second read is served from the cache without another request.
    let cached = restaurants
        .read(None, || client.list_restaurants())
        .await
        .context("re-reading restaurants")?;
    info!(count = cached.len(), "second read served from cache");

    if let Some(first) = cached.first().and_then(|r| r.id.as_deref()) {
        let found = restaurant_by_id(&cached, first).is_some();
        info!(id = first, found, "lookup by id over cached collection");
    }

    restaurants.invalidate();
    info!(stale = restaurants.is_stale(None), "collection invalidated");

    Ok(())
}
