//! shelf-itunes
//!
//! iTunes Search API connector for the shelf ecosystem. Keyless JSON
//! provider covering music albums; search capability only.
#![warn(missing_docs)]

/// HTTP client and provider payload shapes.
pub mod client;

use async_trait::async_trait;

use shelf_core::connector::{ConnectorKey, MediaConnector, SearchProvider};
use shelf_core::{
    AlbumDetails, MediaDetails, MediaItem, MediaKind, SearchRequest, SearchResponse, ShelfError,
};

pub use client::{ItunesAlbum, ItunesClient, ItunesConfig};

/// Public connector type for the iTunes Search API.
pub struct ItunesConnector {
    client: ItunesClient,
}

impl ItunesConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("shelf-itunes");

    /// Build against the public API with default settings.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new_default() -> Result<Self, ShelfError> {
        Self::new(&ItunesConfig::default())
    }

    /// Build with explicit configuration.
    ///
    /// # Errors
    /// Returns an error for an unparseable base URL or HTTP client failure.
    pub fn new(config: &ItunesConfig) -> Result<Self, ShelfError> {
        Ok(Self {
            client: ItunesClient::new(config)?,
        })
    }
}

/// Normalize one provider album into the canonical model.
///
/// The store reports no ratings, so `rating` stays absent rather than zero.
/// Records without a collection id or title cannot be rendered and are
/// dropped by the caller via `None`.
#[must_use]
pub fn normalize_album(raw: ItunesAlbum) -> Option<MediaItem> {
    let id = raw.collection_id?;
    let title = raw.collection_name?;
    let mut item = MediaItem::new(id.to_string(), client::NAME, MediaKind::Album, title);
    item.year = raw
        .release_date
        .as_deref()
        .and_then(|d| d.get(..4))
        .and_then(|y| y.parse().ok());
    item.image = raw.artwork_url100;
    item.details = Some(MediaDetails::Album(AlbumDetails {
        artist: raw.artist_name,
        genre: raw.primary_genre_name,
        track_count: raw.track_count,
        price: raw.collection_price,
        currency: raw.currency,
        explicit: raw
            .collection_explicitness
            .as_deref()
            .map(|e| e == "explicit"),
        preview_url: None,
    }));
    Some(item)
}

impl MediaConnector for ItunesConnector {
    fn name(&self) -> &'static str {
        "shelf-itunes"
    }

    fn vendor(&self) -> &'static str {
        "Apple"
    }

    fn supports_kind(&self, kind: MediaKind) -> bool {
        kind == MediaKind::Album
    }

    fn as_search_provider(&self) -> Option<&dyn SearchProvider> {
        Some(self as &dyn SearchProvider)
    }
}

#[async_trait]
impl SearchProvider for ItunesConnector {
    async fn search(&self, req: SearchRequest) -> Result<SearchResponse, ShelfError> {
        let albums = self.client.search_albums(req.query(), req.limit()).await?;
        let mut results: Vec<MediaItem> = albums.into_iter().filter_map(normalize_album).collect();
        if req.exact() {
            let q = req.query().to_lowercase();
            results.retain(|a| a.title.to_lowercase() == q);
        }
        Ok(SearchResponse { results })
    }
}
