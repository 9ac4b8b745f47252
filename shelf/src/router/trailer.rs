use shelf_core::{Capability, MediaItem, TrailerHit};

use crate::Shelf;

/// Compiled-in lookup table for titles whose trailers are stable and well
/// known; matched before any provider is asked. Keys are lowercase.
const KNOWN_TRAILERS: &[(&str, &str)] = &[
    ("catan", "https://www.youtube.com/watch?v=8d8yumMKJLA"),
    ("gloomhaven", "https://www.youtube.com/watch?v=ZPZvGbcLofk"),
    ("wingspan", "https://www.youtube.com/watch?v=lgDgcLI2B0U"),
    ("azul", "https://www.youtube.com/watch?v=csJL-78NEPQ"),
    ("ticket to ride", "https://www.youtube.com/watch?v=4JhFhyvGdik"),
    ("pandemic", "https://www.youtube.com/watch?v=eLBCnOnWLmc"),
];

impl Shelf {
    /// Look up a trailer for `item`. Always produces a hit.
    ///
    /// Behavior and trade-offs:
    /// - Ordered strategies: the known-title table (exact match first, then
    ///   bidirectional substring), then every kind-eligible trailer provider
    ///   in priority order, and finally a constructed search-results URL.
    /// - Every strategy failure (error or decline) advances the chain; the
    ///   last step cannot fail, so this method never returns an error; at
    ///   worst the caller gets an unverified search-results link.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "shelf::router", skip(self, item), fields(title = %item.title))
    )]
    pub async fn trailer(&self, item: &MediaItem) -> TrailerHit {
        let title_lc = item.title.to_lowercase();

        if let Some((_, url)) = KNOWN_TRAILERS.iter().find(|(known, _)| *known == title_lc) {
            return TrailerHit {
                url: (*url).to_string(),
                title: Some(item.title.clone()),
                verified: true,
            };
        }
        if let Some((_, url)) = KNOWN_TRAILERS
            .iter()
            .find(|(known, _)| title_lc.contains(known) || known.contains(title_lc.as_str()))
        {
            return TrailerHit {
                url: (*url).to_string(),
                title: Some(item.title.clone()),
                verified: true,
            };
        }

        for c in self.ordered_for_kind(Some(item.kind)) {
            if !c.supports_kind(item.kind) {
                continue;
            }
            let Some(p) = c.as_trailer_provider() else {
                continue;
            };
            match Self::provider_call_with_timeout(
                c.name(),
                Capability::Trailer,
                self.cfg.provider_timeout,
                p.trailer(item),
            )
            .await
            {
                Ok(hit) => return hit,
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = c.name(), error = %_e, "trailer strategy declined");
                }
            }
        }

        Self::search_page_hit(&item.title)
    }

    /// Unconditional last resort: a search-results URL the caller can always
    /// render, flagged unverified.
    fn search_page_hit(title: &str) -> TrailerHit {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("search_query", &format!("{title} trailer"))
            .finish();
        TrailerHit {
            url: format!("https://www.youtube.com/results?{query}"),
            title: None,
            verified: false,
        }
    }
}
