use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and cache keying.
///
/// These map one-to-one with router endpoints and allow consistent
/// Display formatting and match-exhaustive handling when adding
/// new capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Free-text title search.
    Search,
    /// Batched detail lookup by provider ids.
    Details,
    /// Rank-ordered hot/trending list.
    Trending,
    /// Related-title recommendations seeded by an item.
    Recommendations,
    /// Trailer/preview lookup for an item.
    Trailer,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Details => "details",
            Self::Trending => "trending",
            Self::Recommendations => "recommendations",
            Self::Trailer => "trailer",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
