//! Conversion from raw BoardGameGeek records to the canonical model.
//!
//! Pure functions, no I/O. Provider ratings arrive on a 0-10 scale and are
//! linearly rescaled to the canonical 0-5 range, clamped; a missing rating
//! stays absent rather than becoming zero.

use shelf_core::{BoardGameDetails, Credit, MediaDetails, MediaItem, MediaKind};

use crate::client::NAME;
use crate::xml::{BggHotItem, BggSearchItem, BggThing};

/// Linear 0-10 → 0-5 rescale with clamping for out-of-range provider values.
#[must_use]
pub fn normalize_rating(provider_rating: f32) -> f32 {
    (provider_rating / 2.0).clamp(0.0, 5.0)
}

fn credits(thing: &BggThing, link_type: &str) -> Vec<Credit> {
    thing
        .links_of(link_type)
        .map(|l| Credit::new(l.id.clone(), l.name.clone()))
        .collect()
}

/// Normalize a full thing record.
#[must_use]
pub fn thing_to_item(thing: BggThing) -> MediaItem {
    let mut item = MediaItem::new(&thing.id, NAME, MediaKind::BoardGame, &thing.name);
    item.year = thing.year;
    item.image = thing.image.clone().or_else(|| thing.thumbnail.clone());
    // A reported average of exactly 0 means "not rated yet" on this API.
    item.rating = thing
        .average
        .filter(|avg| *avg > 0.0)
        .map(normalize_rating);
    item.ratings_count = thing.users_rated;
    item.details = Some(MediaDetails::BoardGame(
        BoardGameDetails {
            description: thing.description.clone(),
            min_players: thing.min_players,
            max_players: thing.max_players,
            min_playtime: thing.min_playtime,
            max_playtime: thing.max_playtime,
            min_age: thing.min_age,
            weight: thing.average_weight,
            rank: thing.rank,
            owned: thing.owned,
            designers: credits(&thing, "boardgamedesigner"),
            artists: credits(&thing, "boardgameartist"),
            publishers: credits(&thing, "boardgamepublisher"),
            categories: credits(&thing, "boardgamecategory"),
            mechanics: credits(&thing, "boardgamemechanic"),
            families: credits(&thing, "boardgamefamily"),
            ..Default::default()
        }
        .with_derived(),
    ));
    item
}

/// Normalize a preliminary search record (no statistics yet).
#[must_use]
pub fn search_item_to_item(raw: BggSearchItem) -> MediaItem {
    let mut item = MediaItem::new(&raw.id, NAME, MediaKind::BoardGame, &raw.name);
    item.year = raw.year;
    item
}

/// Normalize a hot-list entry, keeping its hotness rank as the popularity signal.
#[must_use]
pub fn hot_item_to_item(raw: BggHotItem) -> MediaItem {
    let mut item = MediaItem::new(&raw.id, NAME, MediaKind::BoardGame, &raw.name);
    item.year = raw.year;
    item.image = raw.thumbnail;
    item.details = Some(MediaDetails::BoardGame(BoardGameDetails {
        rank: Some(raw.rank),
        ..Default::default()
    }));
    item
}
