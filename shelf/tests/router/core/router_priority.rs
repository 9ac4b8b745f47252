use shelf::Shelf;
use shelf_core::{MediaKind, TrendingRequest};

use crate::helpers::{game, m_trending};

#[tokio::test]
async fn kind_priority_decides_the_single_winner() {
    let a = m_trending("prov-a", vec![game("1", "prov-a", "From A")]);
    let b = m_trending("prov-b", vec![game("2", "prov-b", "From B")]);

    // Registration order favors a; the explicit preference flips it.
    let shelf = Shelf::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .prefer_for_kind(MediaKind::BoardGame, &[b, a])
        .build()
        .unwrap();

    let hot = shelf
        .trending(TrendingRequest::for_kind(MediaKind::BoardGame))
        .await
        .unwrap();
    assert_eq!(hot[0].source, "prov-b");
}

#[tokio::test]
async fn registration_order_wins_without_preferences() {
    let a = m_trending("prov-a", vec![game("1", "prov-a", "From A")]);
    let b = m_trending("prov-b", vec![game("2", "prov-b", "From B")]);

    let shelf = Shelf::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    let hot = shelf
        .trending(TrendingRequest::for_kind(MediaKind::BoardGame))
        .await
        .unwrap();
    assert_eq!(hot[0].source, "prov-a");
}

#[tokio::test]
async fn unknown_priority_keys_are_dropped_at_build() {
    let a = m_trending("prov-a", vec![game("1", "prov-a", "From A")]);
    let ghost = m_trending("ghost", vec![]);

    // `ghost` is referenced in the preference list but never registered.
    let shelf = Shelf::builder()
        .with_connector(a.clone())
        .prefer_for_kind(MediaKind::BoardGame, &[ghost, a])
        .build()
        .unwrap();

    let hot = shelf
        .trending(TrendingRequest::for_kind(MediaKind::BoardGame))
        .await
        .unwrap();
    assert_eq!(hot[0].source, "prov-a");
}
