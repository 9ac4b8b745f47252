//! Canonical media data model shared by connectors, middleware, and routers.

use serde::{Deserialize, Serialize};
use shelf_types::MediaKind;

/// An `{id, name}` pair for list-valued credits (designers, categories, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    /// Provider-assigned identifier for the credited entity.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Credit {
    /// Convenience constructor.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Qualitative complexity label derived from a numeric weight (1.0..=5.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    /// Weight <= 2.0.
    Light,
    /// Weight <= 3.0.
    MediumLight,
    /// Weight <= 4.0.
    Medium,
    /// Weight <= 4.5.
    MediumHeavy,
    /// Everything above.
    Heavy,
}

impl Complexity {
    /// Derive the label from a numeric weight using fixed thresholds.
    #[must_use]
    pub fn from_weight(weight: f32) -> Self {
        if weight <= 2.0 {
            Self::Light
        } else if weight <= 3.0 {
            Self::MediumLight
        } else if weight <= 4.0 {
            Self::Medium
        } else if weight <= 4.5 {
            Self::MediumHeavy
        } else {
            Self::Heavy
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::MediumLight => "Medium-Light",
            Self::Medium => "Medium",
            Self::MediumHeavy => "Medium-Heavy",
            Self::Heavy => "Heavy",
        }
    }

    /// Case-insensitive keyword match against the label.
    ///
    /// "medium" matches both `Medium` and `Medium-Light`; this is a substring
    /// test, not equality.
    #[must_use]
    pub fn matches_keyword(self, keyword: &str) -> bool {
        self.label()
            .to_ascii_lowercase()
            .contains(&keyword.to_ascii_lowercase())
    }
}

/// Render a numeric range as a human-readable string, collapsing degenerate
/// ranges ("3-4 players" vs "4 players").
#[must_use]
pub fn range_text(min: u32, max: u32, unit: &str) -> String {
    if max <= min {
        format!("{min} {unit}")
    } else {
        format!("{min}-{max} {unit}")
    }
}

/// Board-game payload: player/time bounds, credits, and hotness signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BoardGameDetails {
    /// Free-text description, already entity-unescaped.
    pub description: Option<String>,
    /// Minimum supported player count.
    pub min_players: Option<u32>,
    /// Maximum supported player count.
    pub max_players: Option<u32>,
    /// Minimum play time in minutes.
    pub min_playtime: Option<u32>,
    /// Maximum play time in minutes.
    pub max_playtime: Option<u32>,
    /// Publisher-recommended minimum age.
    pub min_age: Option<u32>,
    /// Community complexity weight (1.0..=5.0).
    pub weight: Option<f32>,
    /// Overall provider rank (1 = best); used as a popularity signal.
    pub rank: Option<u32>,
    /// Number of users reporting ownership; used as a popularity signal.
    pub owned: Option<u64>,
    /// Credited designers.
    pub designers: Vec<Credit>,
    /// Credited artists.
    pub artists: Vec<Credit>,
    /// Publishers.
    pub publishers: Vec<Credit>,
    /// Thematic categories.
    pub categories: Vec<Credit>,
    /// Gameplay mechanics.
    pub mechanics: Vec<Credit>,
    /// Product families.
    pub families: Vec<Credit>,
    /// Derived "2-4 players" style string.
    pub player_count_text: Option<String>,
    /// Derived "60-90 minutes" style string.
    pub play_time_text: Option<String>,
    /// Derived complexity label.
    pub complexity: Option<Complexity>,
}

impl BoardGameDetails {
    /// Populate the derived convenience fields from the numeric bounds.
    #[must_use]
    pub fn with_derived(mut self) -> Self {
        self.player_count_text = match (self.min_players, self.max_players) {
            (Some(min), Some(max)) => Some(range_text(min, max, "players")),
            (Some(only), None) | (None, Some(only)) => Some(range_text(only, only, "players")),
            (None, None) => None,
        };
        self.play_time_text = match (self.min_playtime, self.max_playtime) {
            (Some(min), Some(max)) => Some(range_text(min, max, "minutes")),
            (Some(only), None) | (None, Some(only)) => Some(range_text(only, only, "minutes")),
            (None, None) => None,
        };
        self.complexity = self.weight.map(Complexity::from_weight);
        self
    }
}

/// Music-album payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AlbumDetails {
    /// Primary artist name.
    pub artist: Option<String>,
    /// Primary genre.
    pub genre: Option<String>,
    /// Number of tracks on the album.
    pub track_count: Option<u32>,
    /// Store price, if listed.
    pub price: Option<f32>,
    /// ISO currency code for `price`.
    pub currency: Option<String>,
    /// Whether the album is flagged as explicit.
    pub explicit: Option<bool>,
    /// Provider preview/stream URL.
    pub preview_url: Option<String>,
}

/// Movie payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MovieDetails {
    /// Plot overview.
    pub overview: Option<String>,
    /// Genre names.
    pub genres: Vec<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
}

/// Book payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BookDetails {
    /// Back-cover style description.
    pub description: Option<String>,
    /// Author names.
    pub authors: Vec<String>,
    /// Page count.
    pub pages: Option<u32>,
    /// Subject/genre labels.
    pub subjects: Vec<String>,
}

/// Category-specific payload attached to a [`MediaItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MediaDetails {
    /// Board-game payload.
    BoardGame(BoardGameDetails),
    /// Movie payload.
    Movie(MovieDetails),
    /// Book payload.
    Book(BookDetails),
    /// Album payload.
    Album(AlbumDetails),
}

impl MediaDetails {
    /// Board-game payload, if that is what this carries.
    #[must_use]
    pub const fn as_board_game(&self) -> Option<&BoardGameDetails> {
        match self {
            Self::BoardGame(d) => Some(d),
            _ => None,
        }
    }

    /// Album payload, if that is what this carries.
    #[must_use]
    pub const fn as_album(&self) -> Option<&AlbumDetails> {
        match self {
            Self::Album(d) => Some(d),
            _ => None,
        }
    }
}

/// Canonical, provider-agnostic search/detail result.
///
/// Identity is the `(source, id)` pair: ids are opaque and only unique
/// within one connector, so equal ids from different sources must never be
/// merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Provider-assigned identifier, opaque.
    pub id: String,
    /// Name of the connector that produced this record.
    pub source: String,
    /// Media category.
    pub kind: MediaKind,
    /// Primary display title.
    pub title: String,
    /// Release/publication year.
    pub year: Option<i32>,
    /// Cover/box-art URL.
    pub image: Option<String>,
    /// Normalized rating in `[0, 5]`; `None` means "no rating", never zero.
    pub rating: Option<f32>,
    /// Number of ratings backing `rating`; a confidence signal.
    pub ratings_count: Option<u64>,
    /// Category-specific payload, when the provider supplied one.
    pub details: Option<MediaDetails>,
}

impl MediaItem {
    /// Minimal constructor for a bare preliminary record.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        kind: MediaKind,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            kind,
            title: title.into(),
            year: None,
            image: None,
            rating: None,
            ratings_count: None,
            details: None,
        }
    }

    /// Board-game payload shortcut.
    #[must_use]
    pub fn board_game(&self) -> Option<&BoardGameDetails> {
        self.details.as_ref().and_then(MediaDetails::as_board_game)
    }

    /// Album payload shortcut.
    #[must_use]
    pub fn album(&self) -> Option<&AlbumDetails> {
        self.details.as_ref().and_then(MediaDetails::as_album)
    }
}

/// Outcome of a trailer lookup.
///
/// The trailer router guarantees a hit for every request: when no strategy
/// produces a direct match the final fallback constructs a search-results
/// URL with `verified: false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerHit {
    /// Watch or search-results URL.
    pub url: String,
    /// Video title, when a direct match was found.
    pub title: Option<String>,
    /// True when the URL was confirmed to exist (direct match or oEmbed check).
    pub verified: bool,
}
