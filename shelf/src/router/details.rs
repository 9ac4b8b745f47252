use shelf_core::{Capability, DetailsRequest, MediaItem};

use crate::Shelf;
use crate::shelf_router_fallback;

impl Shelf {
    shelf_router_fallback! {
        /// Fetch full records for a batch of provider ids.
        ///
        /// Behavior and trade-offs:
        /// - Ids are provider-scoped, so the first kind-eligible provider
        ///   that answers wins; ids unknown to it are simply absent from the
        ///   output rather than errors.
        /// - Connectors chunk oversized batches upstream; callers may pass
        ///   any number of ids.
        method: details(req: DetailsRequest) -> Vec<MediaItem>,
        accessor: as_details_provider,
        capability: Capability::Details,
        kind: Some(req.kind),
        not_found: "details".to_string(),
        call: details
    }
}
