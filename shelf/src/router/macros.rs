/// Generate a router async method that orders providers by kind priority,
/// applies kind filters, and calls a single-provider capability method,
/// falling back across providers via the orchestrator.
///
/// Notes on `not_found` label:
/// - Pass a noun phrase only (e.g., "trending titles", "details").
/// - Do not include the word "for" in the label unless naming a subject.
#[macro_export]
macro_rules! shelf_router_fallback {
    (
        $(#[$meta:meta])*
        method: $name:ident( $req_ident:ident : $req_ty:ty ) -> $ret:ty,
        accessor: $accessor:ident,
        capability: $capability:expr,
        kind: $kind:expr,
        not_found: $not_found:expr,
        call: $call_name:ident
    ) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "tracing",
            tracing::instrument(
                target = "shelf::router",
                skip(self, $req_ident),
            )
        )]
        ///
        /// # Errors
        /// Returns an error if no eligible provider succeeds or none support the capability.
        pub async fn $name(
            &self,
            $req_ident: $req_ty,
        ) -> Result<$ret, shelf_core::ShelfError> {
            let kind = $kind;
            self.fetch_first(
                kind,
                $capability,
                $not_found,
                move |c| {
                    if kind.is_some_and(|k| !c.supports_kind(k)) {
                        return None;
                    }
                    if c.$accessor().is_none() {
                        return None;
                    }
                    let req = $req_ident.clone();
                    Some(async move {
                        if let Some(p) = c.$accessor() {
                            p.$call_name(req).await
                        } else {
                            Err(shelf_core::ShelfError::connector(
                                c.name(),
                                concat!("missing ", stringify!($call_name), " capability during call"),
                            ))
                        }
                    })
                },
            )
            .await
        }
    };
}
