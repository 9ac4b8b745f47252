use std::collections::BTreeSet;

use shelf_core::{
    Capability, MediaItem, SearchReport, SearchRequest, SearchResponse, ShelfError, filter, scoring,
};

use crate::Shelf;
use crate::router::util::join_with_deadline;

/// Queries shorter than this never reach a provider; they resolve to an
/// empty report (a no-op, not an error).
const MIN_QUERY_CHARS: usize = 2;

impl Shelf {
    /// Search for titles using a free-text query, with optional kind filter,
    /// constraints, and result limit.
    ///
    /// Behavior and trade-offs:
    /// - Executes the search across all eligible providers concurrently,
    ///   merges results, and de-duplicates by `(source, id)`, never across
    ///   sources, since equal ids from different providers are unrelated.
    /// - Merged results pass the constraint filter, then relevance ranking
    ///   (title, quality, and popularity subscores recomputed per call); if
    ///   `limit` is set, truncation happens after ranking.
    /// - Per-provider failures are absorbed into `warnings` while healthy
    ///   providers still populate the response, so "no matches" and
    ///   "provider down" stay distinguishable.
    ///
    /// # Errors
    /// Returns an error only when no provider produced any results and at
    /// least one attempted provider failed, when no provider supports the
    /// capability, or on overall request timeout.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "shelf::router",
            skip(self, req),
            fields(kind = ?req.kind(), limit = req.limit()),
        )
    )]
    pub async fn search(&self, req: SearchRequest) -> Result<SearchReport, ShelfError> {
        if req.query().chars().count() < MIN_QUERY_CHARS {
            return Ok(SearchReport {
                response: Some(SearchResponse::default()),
                warnings: Vec::new(),
            });
        }

        let ordered = self.ordered_for_kind(req.kind());
        let call_timeout = self.cfg.provider_timeout;
        let tasks = ordered.into_iter().map(|c| {
            let r = req.clone();
            async move {
                let name = c.name();
                if r.kind().is_some_and(|k| !c.supports_kind(k)) {
                    return (name, false, Ok(SearchResponse::default()));
                }
                if let Some(p) = c.as_search_provider() {
                    let res = Self::provider_call_with_timeout(
                        name,
                        Capability::Search,
                        call_timeout,
                        p.search(r),
                    )
                    .await;
                    (name, true, res)
                } else {
                    (name, false, Ok(SearchResponse::default()))
                }
            }
        });

        let joined = join_with_deadline(tasks, self.cfg.request_timeout)
            .await
            .map_err(|_| ShelfError::request_timeout(Capability::Search.to_string()))?;

        let mut merged: Vec<MediaItem> = Vec::new();
        let mut seen = BTreeSet::<(String, String)>::new();
        let mut warnings: Vec<ShelfError> = Vec::new();
        let mut attempted_any = false;
        for (name, attempted, res) in joined {
            if attempted {
                attempted_any = true;
            }
            match res {
                Ok(sr) => {
                    if attempted {
                        for item in sr.results {
                            if seen.insert((item.source.clone(), item.id.clone())) {
                                merged.push(item);
                            }
                        }
                    }
                }
                Err(e) => {
                    if attempted {
                        if let ShelfError::AllProvidersFailed(v) = e {
                            warnings.extend(v);
                        } else {
                            warnings.push(crate::core::tag_err(name, e));
                        }
                    }
                }
            }
        }

        if !attempted_any {
            return Err(ShelfError::unsupported(Capability::Search.to_string()));
        }
        if merged.is_empty() && !warnings.is_empty() {
            return Err(ShelfError::AllProvidersFailed(warnings));
        }

        let filtered = filter::apply(merged, req.filters());
        let ranked = scoring::rank(filtered, req.query(), req.sort());
        let mut results: Vec<MediaItem> = ranked.into_iter().map(|r| r.item).collect();
        if let Some(limit) = req.limit()
            && results.len() > limit
        {
            results.truncate(limit);
        }

        Ok(SearchReport {
            response: Some(SearchResponse { results }),
            warnings,
        })
    }
}
