//! Constraint filtering over normalized results.
//!
//! Pure functions, no I/O. Constraints combine with logical AND; an omitted
//! constraint imposes no restriction, and an item that does not carry the
//! field a constraint inspects passes that constraint (absence is not
//! failure).

use crate::media::{MediaDetails, MediaItem};
use crate::request::FilterOptions;

/// Two closed integer ranges overlap when neither ends before the other
/// starts; touching endpoints count as overlap.
fn ranges_overlap(item: (u32, u32), wanted: (u32, u32)) -> bool {
    !(item.1 < wanted.0 || item.0 > wanted.1)
}

fn item_range(min: Option<u32>, max: Option<u32>) -> Option<(u32, u32)> {
    match (min, max) {
        (Some(lo), Some(hi)) => Some((lo, hi)),
        (Some(only), None) | (None, Some(only)) => Some((only, only)),
        (None, None) => None,
    }
}

fn genre_labels(item: &MediaItem) -> Vec<&str> {
    match &item.details {
        Some(MediaDetails::BoardGame(d)) => d.categories.iter().map(|c| c.name.as_str()).collect(),
        Some(MediaDetails::Album(d)) => d.genre.as_deref().into_iter().collect(),
        Some(MediaDetails::Movie(d)) => d.genres.iter().map(String::as_str).collect(),
        Some(MediaDetails::Book(d)) => d.subjects.iter().map(String::as_str).collect(),
        None => Vec::new(),
    }
}

/// Whether a single item satisfies every set constraint.
#[must_use]
pub fn matches(item: &MediaItem, f: &FilterOptions) -> bool {
    let game = item.board_game();
    let album = item.album();

    if let Some(wanted) = f.players
        && let Some(have) = game.and_then(|g| item_range(g.min_players, g.max_players))
        && !ranges_overlap(have, wanted)
    {
        return false;
    }

    if let Some(wanted) = f.play_time
        && let Some(have) = game.and_then(|g| item_range(g.min_playtime, g.max_playtime))
        && !ranges_overlap(have, wanted)
    {
        return false;
    }

    if let Some(floor) = f.min_age
        && let Some(age) = game.and_then(|g| g.min_age)
        && age < floor
    {
        return false;
    }

    if let Some((lo, hi)) = f.years
        && let Some(year) = item.year
        && (year < lo || year > hi)
    {
        return false;
    }

    if let Some(floor) = f.min_rating
        && let Some(rating) = item.rating
        && rating < floor
    {
        return false;
    }

    if let Some(keyword) = f.complexity.as_deref()
        && let Some(complexity) = game.and_then(|g| g.complexity)
        && !complexity.matches_keyword(keyword)
    {
        return false;
    }

    if let Some(ceiling) = f.max_price
        && let Some(price) = album.and_then(|a| a.price)
        && price > ceiling
    {
        return false;
    }

    if f.exclude_explicit && album.and_then(|a| a.explicit) == Some(true) {
        return false;
    }

    if let Some(keyword) = f.genre.as_deref() {
        let labels = genre_labels(item);
        if !labels.is_empty() {
            let kw = keyword.to_ascii_lowercase();
            if !labels.iter().any(|l| l.to_ascii_lowercase().contains(&kw)) {
                return false;
            }
        }
    }

    true
}

/// Retain only the items that satisfy every set constraint.
#[must_use]
pub fn apply(items: Vec<MediaItem>, f: &FilterOptions) -> Vec<MediaItem> {
    if f.is_empty() {
        return items;
    }
    items.into_iter().filter(|i| matches(i, f)).collect()
}
