//! Minimal end-to-end walkthrough against the deterministic mock connector.
//!
//! Run with: `cargo run -p shelf --example quickstart`

use std::sync::Arc;

use shelf::{MediaKind, SearchRequest, Shelf, SortBy, TrendingRequest};
use shelf_middleware::ConnectorBuilder;
use shelf_mock::MockConnector;
use shelf_types::{CacheConfig, PaceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // A production setup would register shelf-bgg / shelf-itunes here; the
    // mock keeps the example offline and deterministic.
    let connector = ConnectorBuilder::new(Arc::new(MockConnector::new()))
        .with_cache(&CacheConfig::default())
        .with_pace(&PaceConfig { min_delay_ms: 100 })
        .build();

    let shelf = Shelf::builder().with_connector(connector).build()?;

    let req = SearchRequest::builder("catan")
        .kind(MediaKind::BoardGame)
        .sort(SortBy::Rating)
        .limit(5)
        .build()?;
    let report = shelf.search(req).await?;
    println!("search results:");
    for item in report.response.unwrap_or_default().results {
        println!(
            "  {} ({}) rating={:?}",
            item.title,
            item.year.unwrap_or(0),
            item.rating
        );
    }

    let hot = shelf
        .trending(TrendingRequest::for_kind(MediaKind::BoardGame).with_limit(3))
        .await?;
    println!("trending now:");
    for item in &hot {
        println!("  {}", item.title);
    }

    // Trailer lookup never fails; worst case is a search-results link.
    if let Some(first) = hot.first() {
        let hit = shelf.trailer(first).await;
        println!("trailer for {}: {}", first.title, hit.url);
    }

    Ok(())
}
