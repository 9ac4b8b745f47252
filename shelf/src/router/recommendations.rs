use shelf_core::{Capability, MediaItem, ShelfError};

use crate::Shelf;

impl Shelf {
    /// Fetch up to `limit` titles related to `item`.
    ///
    /// Behavior and trade-offs:
    /// - Routed to the item's own kind; the first provider that produces a
    ///   non-error answer wins (providers that do not know the item decline
    ///   with `NotFound` and the next one is tried).
    /// - The seed item is passed through whole so providers can reuse any
    ///   categories/mechanics it already carries without a detail re-fetch.
    ///
    /// # Errors
    /// Returns an error if no eligible provider succeeds or none support the capability.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "shelf::router", skip(self, item), fields(title = %item.title))
    )]
    pub async fn recommendations(
        &self,
        item: &MediaItem,
        limit: usize,
    ) -> Result<Vec<MediaItem>, ShelfError> {
        let seed = item.clone();
        self.fetch_first(
            Some(item.kind),
            Capability::Recommendations,
            format!("recommendations for {}", item.title),
            move |c| {
                if !c.supports_kind(seed.kind) {
                    return None;
                }
                c.as_recommendations_provider()?;
                let seed = seed.clone();
                Some(async move {
                    if let Some(p) = c.as_recommendations_provider() {
                        p.recommendations(&seed, limit).await
                    } else {
                        Err(ShelfError::connector(
                            c.name(),
                            "missing recommendations capability during call",
                        ))
                    }
                })
            },
        )
        .await
    }
}
