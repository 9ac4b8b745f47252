use shelf_core::{AlbumDetails, MediaDetails, MediaItem, MediaKind};

fn album(
    id: &str,
    title: &str,
    artist: &str,
    year: i32,
    genre: &str,
    price: f32,
    explicit: bool,
) -> MediaItem {
    let mut item = MediaItem::new(id, "shelf-mock", MediaKind::Album, title);
    item.year = Some(year);
    item.details = Some(MediaDetails::Album(AlbumDetails {
        artist: Some(artist.to_string()),
        genre: Some(genre.to_string()),
        track_count: Some(12),
        price: Some(price),
        currency: Some("USD".to_string()),
        explicit: Some(explicit),
        preview_url: None,
    }));
    item
}

/// Deterministic album fixtures.
pub fn all() -> Vec<MediaItem> {
    vec![
        album("1440857781", "Abbey Road", "The Beatles", 1969, "Rock", 12.99, false),
        album("1450695723", "OK Computer", "Radiohead", 1997, "Alternative", 9.99, false),
        album("1445949265", "good kid, m.A.A.d city", "Kendrick Lamar", 2012, "Hip-Hop", 11.99, true),
    ]
}

pub fn by_id(id: &str) -> Option<MediaItem> {
    all().into_iter().find(|a| a.id == id)
}

pub fn search(query: &str, exact: bool) -> Vec<MediaItem> {
    let q = query.to_lowercase();
    all()
        .into_iter()
        .filter(|a| {
            let t = a.title.to_lowercase();
            if exact { t == q } else { t.contains(&q) }
        })
        .collect()
}
