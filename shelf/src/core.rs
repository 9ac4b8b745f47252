use std::collections::HashMap;
use std::sync::Arc;

use shelf_core::MediaConnector;
use shelf_core::connector::ConnectorKey;
use shelf_types::{Capability, FetchStrategy, MediaKind, ShelfConfig, ShelfError};

/// Orchestrator that routes requests across registered providers.
pub struct Shelf {
    pub(crate) connectors: Vec<Arc<dyn MediaConnector>>,
    pub(crate) cfg: ShelfConfig,
}

/// Builder for constructing a `Shelf` orchestrator with custom configuration.
pub struct ShelfBuilder {
    connectors: Vec<Arc<dyn MediaConnector>>,
    cfg: ShelfConfig,
}

impl Default for ShelfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShelfBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connectors; you must register at least one via
    ///   [`with_connector`](Self::with_connector).
    /// - Defaults are conservative: priority-with-fallback fetches and a 10s
    ///   per-provider timeout, no overall request deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: ShelfConfig::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Behavior and trade-offs:
    /// - The order in which you register connectors is used only when no
    ///   explicit priorities are set via [`prefer_for_kind`](Self::prefer_for_kind).
    /// - Multiple connectors can support the same capability; the
    ///   orchestrator routes based on priorities and the fetch strategy.
    /// - Duplicates are not deduplicated; avoid registering the same
    ///   connector twice.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn MediaConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set preferred providers for a `MediaKind` using connector instances.
    ///
    /// Behavior and trade-offs:
    /// - Influences ordering among eligible providers for the given kind; it
    ///   does not filter out non-listed connectors (they remain after the
    ///   listed ones).
    /// - Type-safe and ergonomic: eliminates the possibility of typos and
    ///   makes refactoring safer.
    #[must_use]
    pub fn prefer_for_kind(
        mut self,
        kind: MediaKind,
        connectors_desc: &[Arc<dyn MediaConnector>],
    ) -> Self {
        let keys: Vec<ConnectorKey> = connectors_desc
            .iter()
            .map(|c| ConnectorKey::new(c.name()))
            .collect();
        self.cfg.per_kind_priority.insert(kind, keys);
        self
    }

    /// Select the fetch strategy for multi-provider requests.
    ///
    /// Behavior and trade-offs:
    /// - `PriorityWithFallback`: deterministic order, applies the
    ///   per-provider timeout, aggregates errors; may be slower but
    ///   predictable and economical on provider rate limits.
    /// - `Latency`: race all eligible providers and return the first
    ///   success; fastest typical latency but consumes more concurrent
    ///   requests and can add load.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Set the per-provider request timeout.
    ///
    /// Applied in both fetch strategies to bound each provider call; a
    /// timeout degrades exactly like any other provider failure.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall request timeout for fan-out aggregations (search).
    ///
    /// Bounds total latency even when many providers time out sequentially.
    /// When exceeded, returns a `RequestTimeout` error for the capability.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the `Shelf` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via
    /// [`with_connector`](Self::with_connector).
    pub fn build(mut self) -> Result<Shelf, ShelfError> {
        // Validate priority keys against registered connectors; drop unknowns and dedup.
        let known: std::collections::HashSet<&'static str> =
            self.connectors.iter().map(|c| c.name()).collect();

        for v in self.cfg.per_kind_priority.values_mut() {
            let mut out: Vec<ConnectorKey> = Vec::new();
            let mut seen: std::collections::HashSet<&'static str> =
                std::collections::HashSet::new();
            for k in v.iter().copied() {
                let n = k.as_str();
                if known.contains(n) && seen.insert(n) {
                    out.push(k);
                }
            }
            *v = out;
        }

        if self.connectors.is_empty() {
            return Err(ShelfError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }

        Ok(Shelf {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

/// Tag an untagged error with the connector that produced it, leaving
/// already-classified variants untouched.
pub(crate) fn tag_err(connector: &str, e: ShelfError) -> ShelfError {
    match e {
        e @ (ShelfError::NotFound { .. }
        | ShelfError::ProviderTimeout { .. }
        | ShelfError::Connector { .. }
        | ShelfError::RequestTimeout { .. }
        | ShelfError::AllProvidersTimedOut { .. }
        | ShelfError::AllProvidersFailed(_)) => e,
        other => ShelfError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Apply an optional overall deadline to a fan-out future.
///
/// On timeout this returns `RequestTimeout("request")`, which call sites
/// remap to a more specific capability label as needed.
pub(crate) async fn with_request_deadline<F, T>(
    deadline: Option<std::time::Duration>,
    fut: F,
) -> Result<T, ShelfError>
where
    F: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => (tokio::time::timeout(d, fut).await)
            .map_err(|_| ShelfError::request_timeout("request")),
        None => Ok(fut.await),
    }
}

impl Shelf {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "shelf::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<T, ShelfError>
    where
        Fut: core::future::Future<Output = Result<T, ShelfError>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(ShelfError::provider_timeout(
                connector_name,
                capability.to_string(),
            ))
        })
    }

    /// Start building a new `Shelf` instance.
    ///
    /// Typical usage chains provider registration and preferences, e.g.:
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let bgg = Arc::new(BggConnector::new_default()?);
    /// let itunes = Arc::new(ItunesConnector::new_default()?);
    ///
    /// let shelf = shelf::Shelf::builder()
    ///     .with_connector(bgg.clone())
    ///     .with_connector(itunes.clone())
    ///     .prefer_for_kind(shelf::MediaKind::BoardGame, &[bgg])
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> ShelfBuilder {
        ShelfBuilder::new()
    }

    pub(crate) fn ordered_for_kind(&self, kind: Option<MediaKind>) -> Vec<Arc<dyn MediaConnector>> {
        let mut out: Vec<(usize, Arc<dyn MediaConnector>)> =
            self.connectors.iter().cloned().enumerate().collect();
        if let Some(k) = kind
            && let Some(pref) = self.cfg.per_kind_priority.get(&k)
        {
            let pos: HashMap<_, _> = pref
                .iter()
                .enumerate()
                .map(|(i, n)| (n.as_str(), i))
                .collect();
            out.sort_by_key(|(orig_i, c)| {
                (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i)
            });
            return out.into_iter().map(|(_, c)| c).collect();
        }
        out.into_iter().map(|(_, c)| c).collect()
    }

    /// Generic single-winner fetch helper.
    ///
    /// - Honors `FetchStrategy::{PriorityWithFallback, Latency}`
    /// - Applies the per-provider timeout in both modes
    /// - Aggregates errors via [`crate::router::util::collapse_errors`]: all
    ///   not-found collapses to `NotFound`, all timeouts to
    ///   `AllProvidersTimedOut`, no attempt to `Unsupported`
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "shelf::core::fetch_first",
            skip(self, call),
            fields(capability = %capability, kind = ?kind),
        )
    )]
    pub(crate) async fn fetch_first<T, F, Fut>(
        &self,
        kind: Option<MediaKind>,
        capability: Capability,
        not_found_label: String,
        call: F,
    ) -> Result<T, ShelfError>
    where
        T: Send,
        F: Fn(Arc<dyn MediaConnector>) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, ShelfError>> + Send,
    {
        match self.cfg.fetch_strategy {
            FetchStrategy::PriorityWithFallback => {
                self.fetch_first_priority(kind, capability, not_found_label, call)
                    .await
            }
            FetchStrategy::Latency => {
                self.fetch_first_latency(kind, capability, not_found_label, call)
                    .await
            }
            // `FetchStrategy` is `#[non_exhaustive]`, so a wildcard is required
            // even though every variant at this version is handled above.
            _ => unreachable!("unhandled FetchStrategy variant"),
        }
    }

    async fn fetch_first_priority<T, F, Fut>(
        &self,
        kind: Option<MediaKind>,
        capability: Capability,
        not_found_label: String,
        call: F,
    ) -> Result<T, ShelfError>
    where
        T: Send,
        F: Fn(Arc<dyn MediaConnector>) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, ShelfError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<ShelfError> = Vec::new();

        for c in self.ordered_for_kind(kind) {
            if let Some(fut) = call(c.clone()) {
                attempted_any = true;
                match Self::provider_call_with_timeout(
                    c.name(),
                    capability,
                    self.cfg.provider_timeout,
                    fut,
                )
                .await
                {
                    Ok(v) => return Ok(v),
                    Err(e @ (ShelfError::NotFound { .. } | ShelfError::ProviderTimeout { .. })) => {
                        errors.push(e);
                    }
                    Err(e) => errors.push(tag_err(c.name(), e)),
                }
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(not_found_label),
        ))
    }

    async fn fetch_first_latency<T, F, Fut>(
        &self,
        kind: Option<MediaKind>,
        capability: Capability,
        not_found_label: String,
        call: F,
    ) -> Result<T, ShelfError>
    where
        T: Send,
        F: Fn(Arc<dyn MediaConnector>) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, ShelfError>> + Send,
    {
        use futures::stream::{FuturesUnordered, StreamExt};

        let mut futs = FuturesUnordered::new();
        let mut attempted_any = false;
        for c in self.ordered_for_kind(kind) {
            if let Some(fut) = call(c.clone()) {
                let name = c.name();
                let timeout = self.cfg.provider_timeout;
                futs.push(async move {
                    (
                        name,
                        Self::provider_call_with_timeout(name, capability, timeout, fut).await,
                    )
                });
                attempted_any = true;
            }
        }

        let mut errors: Vec<ShelfError> = Vec::new();
        while let Some((name, res)) = futs.next().await {
            match res {
                Ok(v) => return Ok(v),
                Err(e @ (ShelfError::ProviderTimeout { .. } | ShelfError::NotFound { .. })) => {
                    errors.push(e);
                }
                Err(e) => errors.push(tag_err(name, e)),
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(not_found_label),
        ))
    }
}
