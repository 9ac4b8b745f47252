use core::fmt;
use serde::{Deserialize, Serialize};

/// Media category handled by the shelf ecosystem.
///
/// Connectors declare which kinds they serve via
/// `MediaConnector::supports_kind`; ids are only unique within one
/// connector *and* one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MediaKind {
    /// Tabletop/board games.
    BoardGame,
    /// Feature films.
    Movie,
    /// Books.
    Book,
    /// Music albums.
    Album,
}

impl MediaKind {
    /// Stable, kebab-case identifier for logs and cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BoardGame => "board-game",
            Self::Movie => "movie",
            Self::Book => "book",
            Self::Album => "album",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
