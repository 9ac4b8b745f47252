use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use shelf::Shelf;
use shelf_core::{SearchRequest, SearchResponse};

use crate::helpers::MockConnector;

#[tokio::test]
async fn short_queries_no_op_without_touching_providers() {
    let called = Arc::new(AtomicBool::new(false));
    let called_probe = called.clone();
    let connector = MockConnector::builder()
        .name("probe")
        .with_search_fn(move |_req| {
            called_probe.store(true, Ordering::SeqCst);
            Ok(SearchResponse::default())
        })
        .build();

    let shelf = Shelf::builder().with_connector(connector).build().unwrap();

    let out = shelf
        .search(SearchRequest::builder("c").build().unwrap())
        .await
        .unwrap();

    assert!(out.response.unwrap().results.is_empty());
    assert!(out.warnings.is_empty());
    assert!(
        !called.load(Ordering::SeqCst),
        "a one-character query must not reach any provider"
    );
}
