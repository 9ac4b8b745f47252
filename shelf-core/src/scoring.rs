//! Relevance scoring and ranking.
//!
//! Scores are ephemeral: they are computed per ranking pass, carried in the
//! [`Ranked`] wrapper, and never stored back onto the item. Routers unwrap
//! the bare items at the API boundary.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::media::MediaItem;
use crate::request::SortBy;

/// Sort-preference bias multiplier applied to the matching subscore.
const PREFERENCE_BOOST: f32 = 1.5;
/// Flat quality bonus for titles from the last two years under `SortBy::Recency`.
const RECENCY_BONUS: f32 = 20.0;
const RECENCY_WINDOW_YEARS: i32 = 2;

/// Composite relevance score for one item against one query.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelevanceScore {
    /// How well the title matches the query (0..=100).
    pub title: f32,
    /// Rating strength dampened by ratings-count confidence (0..=80 with bias).
    pub quality: f32,
    /// Provider rank/ownership signal (0..=60 with bias).
    pub popularity: f32,
}

impl RelevanceScore {
    /// Unweighted sum of the subscores, recomputed on every call.
    #[must_use]
    pub fn total(&self) -> f32 {
        self.title + self.quality + self.popularity
    }
}

/// An item paired with the score that ranked it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranked<T> {
    /// The scored item.
    pub item: T,
    /// Score at ranking time.
    pub score: RelevanceScore,
}

/// Title-match subscore.
///
/// Exact case-insensitive match scores 100; substring containment in either
/// direction scores 70; otherwise the fraction of query words appearing as
/// substrings of the title scales to a 50-point maximum.
#[must_use]
pub fn title_score(title: &str, query: &str) -> f32 {
    let t = title.to_lowercase();
    let q = query.to_lowercase();
    if t == q {
        return 100.0;
    }
    if t.contains(&q) || q.contains(&t) {
        return 70.0;
    }
    let words: Vec<&str> = q.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let hits = words.iter().filter(|w| t.contains(*w)).count();
    #[allow(clippy::cast_precision_loss)]
    let fraction = hits as f32 / words.len() as f32;
    fraction * 50.0
}

/// Quality subscore: rating contributes up to 50 points, ratings-count up to
/// 30 via logarithmic dampening so huge counts win by a few points, not 5x.
#[must_use]
pub fn quality_score(item: &MediaItem, sort: SortBy) -> f32 {
    let mut score = 0.0;
    if let Some(rating) = item.rating {
        score += rating * 10.0;
    }
    if let Some(count) = item.ratings_count {
        #[allow(clippy::cast_precision_loss)]
        let dampened = ((count as f32) + 1.0).log10() * 5.0;
        score += dampened.min(30.0);
    }
    if sort == SortBy::Rating {
        score *= PREFERENCE_BOOST;
    }
    if sort == SortBy::Recency
        && let Some(year) = item.year
        && year >= chrono::Utc::now().year() - RECENCY_WINDOW_YEARS
    {
        score += RECENCY_BONUS;
    }
    score
}

/// Popularity subscore from provider rank/ownership signals.
#[must_use]
pub fn popularity_score(item: &MediaItem, sort: SortBy) -> f32 {
    let mut score = 0.0;
    if let Some(game) = item.board_game() {
        if let Some(rank) = game.rank {
            #[allow(clippy::cast_precision_loss)]
            let from_rank = 30.0 - (rank as f32) / 1000.0;
            score += from_rank.max(0.0);
        }
        if game.owned.is_some_and(|owned| owned > 1000) {
            score += 10.0;
        }
    }
    if sort == SortBy::Popularity {
        score *= PREFERENCE_BOOST;
    }
    score
}

/// Score one item against a query under the caller's sort preference.
#[must_use]
pub fn score(item: &MediaItem, query: &str, sort: SortBy) -> RelevanceScore {
    RelevanceScore {
        title: title_score(&item.title, query),
        quality: quality_score(item, sort),
        popularity: popularity_score(item, sort),
    }
}

/// Rank items by total score, descending. The sort is stable, so ties keep
/// their merge order.
#[must_use]
pub fn rank(items: Vec<MediaItem>, query: &str, sort: SortBy) -> Vec<Ranked<MediaItem>> {
    let mut ranked: Vec<Ranked<MediaItem>> = items
        .into_iter()
        .map(|item| {
            let score = score(&item, query, sort);
            Ranked { item, score }
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .total()
            .partial_cmp(&a.score.total())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}
