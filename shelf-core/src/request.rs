//! Request and response envelopes exchanged between routers and connectors.

use serde::{Deserialize, Serialize};
use shelf_types::{MediaKind, ShelfError};

use crate::media::MediaItem;

/// Caller's ranking preference.
///
/// A preference is a soft bias applied during scoring (the matching subscore
/// is multiplied by 1.5), not a hard sort override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SortBy {
    /// Composite relevance, no bias.
    #[default]
    Relevance,
    /// Bias toward highly rated titles.
    Rating,
    /// Bias toward provider rank/ownership signals.
    Popularity,
    /// Bias toward recent releases (+20 quality for titles from the last 2 years).
    Recency,
}

/// User-supplied constraints applied after normalization.
///
/// Every constraint is optional and independently applicable; constraints
/// combine with logical AND. Items lacking the field a constraint inspects
/// pass that constraint (absence is not failure), with the single exception
/// of range overlap where the provider reported bounds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Requested player-count range; rejects items whose range cannot overlap.
    pub players: Option<(u32, u32)>,
    /// Requested play-time range in minutes; same overlap logic.
    pub play_time: Option<(u32, u32)>,
    /// Reject items whose minimum age is below this (stricter-only).
    pub min_age: Option<u32>,
    /// Inclusive release-year range.
    pub years: Option<(i32, i32)>,
    /// Reject items with a rating below this; unrated items pass.
    pub min_rating: Option<f32>,
    /// Case-insensitive keyword matched against the derived complexity label.
    pub complexity: Option<String>,
    /// Reject items priced above this.
    pub max_price: Option<f32>,
    /// Reject items flagged explicit.
    pub exclude_explicit: bool,
    /// Case-insensitive keyword matched against genres/categories.
    pub genre: Option<String>,
}

impl FilterOptions {
    /// True when no constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_none()
            && self.play_time.is_none()
            && self.min_age.is_none()
            && self.years.is_none()
            && self.min_rating.is_none()
            && self.complexity.is_none()
            && self.max_price.is_none()
            && !self.exclude_explicit
            && self.genre.is_none()
    }
}

/// Free-text search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    query: String,
    kind: Option<MediaKind>,
    limit: Option<usize>,
    exact: bool,
    sort: SortBy,
    filters: FilterOptions,
}

impl SearchRequest {
    /// Start building a request for the given query.
    #[must_use]
    pub fn builder(query: impl Into<String>) -> SearchRequestBuilder {
        SearchRequestBuilder {
            query: query.into(),
            kind: None,
            limit: None,
            exact: false,
            sort: SortBy::default(),
            filters: FilterOptions::default(),
        }
    }

    /// The trimmed query string.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Optional kind restriction.
    #[must_use]
    pub const fn kind(&self) -> Option<MediaKind> {
        self.kind
    }

    /// Optional result cap, applied after merge and ranking.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Whether providers should perform an exact-title match.
    #[must_use]
    pub const fn exact(&self) -> bool {
        self.exact
    }

    /// Ranking preference.
    #[must_use]
    pub const fn sort(&self) -> SortBy {
        self.sort
    }

    /// Post-normalization constraints.
    #[must_use]
    pub const fn filters(&self) -> &FilterOptions {
        &self.filters
    }
}

/// Builder for [`SearchRequest`].
#[derive(Debug, Clone)]
pub struct SearchRequestBuilder {
    query: String,
    kind: Option<MediaKind>,
    limit: Option<usize>,
    exact: bool,
    sort: SortBy,
    filters: FilterOptions,
}

impl SearchRequestBuilder {
    /// Restrict the search to one media kind.
    #[must_use]
    pub const fn kind(mut self, kind: MediaKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Cap the number of merged results.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request an exact-title provider match.
    #[must_use]
    pub const fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Set the ranking preference.
    #[must_use]
    pub const fn sort(mut self, sort: SortBy) -> Self {
        self.sort = sort;
        self
    }

    /// Attach post-normalization constraints.
    #[must_use]
    pub fn filters(mut self, filters: FilterOptions) -> Self {
        self.filters = filters;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the query is blank or the limit is zero.
    /// Queries shorter than the router's minimum are legal here; the router
    /// treats them as a no-op rather than an error.
    pub fn build(self) -> Result<SearchRequest, ShelfError> {
        let query = self.query.trim().to_string();
        if query.is_empty() {
            return Err(ShelfError::InvalidArg("query must not be blank".into()));
        }
        if self.limit == Some(0) {
            return Err(ShelfError::InvalidArg("limit must be positive".into()));
        }
        Ok(SearchRequest {
            query,
            kind: self.kind,
            limit: self.limit,
            exact: self.exact,
            sort: self.sort,
            filters: self.filters,
        })
    }
}

/// Trending/hot list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrendingRequest {
    /// Optional kind restriction.
    pub kind: Option<MediaKind>,
    /// Optional result cap.
    pub limit: Option<usize>,
}

impl TrendingRequest {
    /// Request the trending list for one media kind.
    #[must_use]
    pub const fn for_kind(kind: MediaKind) -> Self {
        Self {
            kind: Some(kind),
            limit: None,
        }
    }

    /// Cap the number of results.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Batched detail lookup by provider ids.
///
/// Connectors chunk oversized batches upstream (20 ids per request); callers
/// may pass any length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsRequest {
    /// Kind the ids belong to.
    pub kind: MediaKind,
    /// Provider-assigned ids.
    pub ids: Vec<String>,
}

impl DetailsRequest {
    /// Convenience constructor.
    pub fn new(kind: MediaKind, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            kind,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Raw provider search response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Normalized results in provider order.
    pub results: Vec<MediaItem>,
}

/// Aggregated search outcome with partial-failure visibility.
///
/// `response` holds the merged, filtered, ranked results; `warnings` carries
/// per-provider failures that were absorbed during the fan-out. An empty
/// `response` with empty `warnings` means "no matches"; an empty `response`
/// with warnings means one or more providers were down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Merged response; `None` only when every attempted provider failed.
    pub response: Option<SearchResponse>,
    /// Absorbed per-provider failures.
    pub warnings: Vec<ShelfError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_trims_and_validates() {
        let req = SearchRequest::builder("  catan  ").build().unwrap();
        assert_eq!(req.query(), "catan");

        assert!(SearchRequest::builder("   ").build().is_err());
        assert!(SearchRequest::builder("x").limit(0).build().is_err());
    }

    #[test]
    fn builder_carries_options() {
        let req = SearchRequest::builder("gloomhaven")
            .kind(MediaKind::BoardGame)
            .limit(5)
            .exact(true)
            .sort(SortBy::Rating)
            .build()
            .unwrap();
        assert_eq!(req.kind(), Some(MediaKind::BoardGame));
        assert_eq!(req.limit(), Some(5));
        assert!(req.exact());
        assert_eq!(req.sort(), SortBy::Rating);
    }
}
