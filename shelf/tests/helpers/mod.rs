// Re-export helpers so tests can `use helpers::*;`
pub mod mock_connector;

pub use mock_connector::{MockConnector, m_search, m_trending};

use shelf_core::{BoardGameDetails, MediaDetails, MediaItem, MediaKind};

// ---------- Lightweight fixtures and helpers for tests ----------

/// Minimal board-game item with just identity and a title.
pub fn game(id: &str, source: &str, title: &str) -> MediaItem {
    MediaItem::new(id, source, MediaKind::BoardGame, title)
}

/// Board-game item carrying rating and popularity signals for ranking tests.
#[allow(dead_code)]
pub fn rated_game(
    id: &str,
    source: &str,
    title: &str,
    rating: f32,
    ratings_count: u64,
    rank: u32,
) -> MediaItem {
    let mut item = game(id, source, title);
    item.rating = Some(rating);
    item.ratings_count = Some(ratings_count);
    item.details = Some(MediaDetails::BoardGame(BoardGameDetails {
        rank: Some(rank),
        ..Default::default()
    }));
    item
}

/// Minimal album item.
#[allow(dead_code)]
pub fn album(id: &str, source: &str, title: &str) -> MediaItem {
    MediaItem::new(id, source, MediaKind::Album, title)
}
