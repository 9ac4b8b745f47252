use shelf_core::{BoardGameDetails, Credit, MediaDetails, MediaItem, MediaKind};

fn game(
    id: &str,
    title: &str,
    year: i32,
    rating: f32,
    ratings_count: u64,
    rank: u32,
    players: (u32, u32),
    playtime: (u32, u32),
    weight: f32,
    categories: &[(&str, &str)],
) -> MediaItem {
    let mut item = MediaItem::new(id, "shelf-mock", MediaKind::BoardGame, title);
    item.year = Some(year);
    item.rating = Some(rating);
    item.ratings_count = Some(ratings_count);
    item.details = Some(MediaDetails::BoardGame(
        BoardGameDetails {
            min_players: Some(players.0),
            max_players: Some(players.1),
            min_playtime: Some(playtime.0),
            max_playtime: Some(playtime.1),
            min_age: Some(10),
            weight: Some(weight),
            rank: Some(rank),
            owned: Some(u64::from(rank) * 10 + 5_000),
            categories: categories
                .iter()
                .map(|(cid, name)| Credit::new(*cid, *name))
                .collect(),
            ..Default::default()
        }
        .with_derived(),
    ));
    item
}

/// Deterministic board-game fixtures, hottest first.
pub fn all() -> Vec<MediaItem> {
    vec![
        game(
            "13",
            "Catan",
            1995,
            3.6,
            120_000,
            500,
            (3, 4),
            (60, 120),
            2.3,
            &[("1026", "Negotiation"), ("1008", "Territory Building")],
        ),
        game(
            "174430",
            "Gloomhaven",
            2017,
            4.3,
            60_000,
            3,
            (1, 4),
            (60, 120),
            3.9,
            &[("1022", "Adventure"), ("1010", "Fantasy")],
        ),
        game(
            "266192",
            "Wingspan",
            2019,
            4.0,
            90_000,
            25,
            (1, 5),
            (40, 70),
            2.5,
            &[("1089", "Animals"), ("1002", "Card Game")],
        ),
        game(
            "230802",
            "Azul",
            2017,
            3.9,
            100_000,
            70,
            (2, 4),
            (30, 45),
            1.8,
            &[("1009", "Abstract Strategy")],
        ),
    ]
}

pub fn by_id(id: &str) -> Option<MediaItem> {
    all().into_iter().find(|g| g.id == id)
}

pub fn search(query: &str, exact: bool) -> Vec<MediaItem> {
    let q = query.to_lowercase();
    all()
        .into_iter()
        .filter(|g| {
            let t = g.title.to_lowercase();
            if exact { t == q } else { t.contains(&q) }
        })
        .collect()
}

/// Hot list in rank-ascending order (rank 1 = hottest).
pub fn hot() -> Vec<MediaItem> {
    let mut games = all();
    games.sort_by_key(|g| g.board_game().and_then(|d| d.rank).unwrap_or(u32::MAX));
    games
}
