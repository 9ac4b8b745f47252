//! Event-based parsers for the BoardGameGeek XML API v2.
//!
//! The API puts most scalar data in `value` attributes on self-closing tags
//! (`<minplayers value="3"/>`), free text in element bodies (descriptions,
//! sometimes CDATA-wrapped), and list-valued fields as repeated `<link
//! type="..">` siblings. Parsers tolerate both self-closing and content
//! forms of the same tag and un-escape entities in text content.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use shelf_types::ShelfError;

/// Preliminary record from the `/search` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BggSearchItem {
    /// Thing id.
    pub id: String,
    /// Thing subtype, e.g. "boardgame" or "boardgameexpansion".
    pub kind: String,
    /// Primary name.
    pub name: String,
    /// Publication year, when reported.
    pub year: Option<i32>,
}

/// One `<link type=".." id=".." value=".."/>` element on a thing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BggLink {
    /// Link type string, e.g. "boardgamecategory".
    pub link_type: String,
    /// Linked entity id.
    pub id: String,
    /// Linked entity display name.
    pub name: String,
}

/// Full record from the `/thing` endpoint with statistics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BggThing {
    /// Thing id.
    pub id: String,
    /// Primary name. Records without one are dropped by the parser.
    pub name: String,
    /// Publication year.
    pub year: Option<i32>,
    /// Box-art URL.
    pub image: Option<String>,
    /// Thumbnail URL.
    pub thumbnail: Option<String>,
    /// Free-text description, entity-unescaped.
    pub description: Option<String>,
    /// Player-count lower bound.
    pub min_players: Option<u32>,
    /// Player-count upper bound.
    pub max_players: Option<u32>,
    /// Play-time lower bound in minutes.
    pub min_playtime: Option<u32>,
    /// Play-time upper bound in minutes.
    pub max_playtime: Option<u32>,
    /// Publisher-recommended minimum age.
    pub min_age: Option<u32>,
    /// Community average rating on the provider's 0-10 scale.
    pub average: Option<f32>,
    /// Number of users who rated the thing.
    pub users_rated: Option<u64>,
    /// Community complexity weight (1-5).
    pub average_weight: Option<f32>,
    /// Overall board-game rank (1 = best); unranked things have none.
    pub rank: Option<u32>,
    /// Number of users reporting ownership.
    pub owned: Option<u64>,
    /// All typed links (categories, mechanics, credits, families).
    pub links: Vec<BggLink>,
}

impl BggThing {
    /// All links of one type, in document order.
    pub fn links_of(&self, link_type: &str) -> impl Iterator<Item = &BggLink> {
        self.links.iter().filter(move |l| l.link_type == link_type)
    }
}

/// Entry from the `/hot` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BggHotItem {
    /// Thing id.
    pub id: String,
    /// Hotness rank (1 = hottest).
    pub rank: u32,
    /// Display name.
    pub name: String,
    /// Publication year, when reported.
    pub year: Option<i32>,
    /// Thumbnail URL.
    pub thumbnail: Option<String>,
}

fn parse_error(e: impl std::fmt::Display) -> ShelfError {
    ShelfError::Data(format!("XML parse error: {e}"))
}

/// The provider double-escapes free text: CDATA sections still carry
/// `&amp;`-style entities that must be resolved by hand.
fn unescape_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#10;", "\n")
}

fn attr(e: &quick_xml::events::BytesStart<'_>, key: &str) -> Option<String> {
    e.attributes().flatten().find_map(|a| {
        (a.key.as_ref() == key.as_bytes())
            .then(|| String::from_utf8_lossy(&a.value).into_owned())
    })
}

/// Attribute decoded with XML entities resolved (`&amp;` in attribute values).
fn attr_unescaped(e: &quick_xml::events::BytesStart<'_>, key: &str) -> Option<String> {
    e.attributes().flatten().find_map(|a| {
        (a.key.as_ref() == key.as_bytes()).then(|| {
            a.unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&a.value).into_owned())
        })
    })
}

/// Parse a `/search` response document.
pub fn parse_search(xml: &str) -> Result<Vec<BggSearchItem>, ShelfError> {
    #[derive(Default)]
    struct Builder {
        id: Option<String>,
        kind: Option<String>,
        name: Option<String>,
        year: Option<i32>,
    }

    impl Builder {
        fn build(self) -> Option<BggSearchItem> {
            // A record without its primary name cannot be rendered; drop it.
            Some(BggSearchItem {
                id: self.id?,
                kind: self.kind.unwrap_or_else(|| "boardgame".to_string()),
                name: self.name?,
                year: self.year,
            })
        }
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<Builder> = None;

    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"item" => {
                    current = Some(Builder {
                        id: attr(&e, "id"),
                        kind: attr(&e, "type"),
                        ..Default::default()
                    });
                }
                b"name" => {
                    if let Some(ref mut b) = current
                        && attr(&e, "type").as_deref() != Some("alternate")
                        && b.name.is_none()
                    {
                        b.name = attr_unescaped(&e, "value");
                    }
                }
                b"yearpublished" => {
                    if let Some(ref mut b) = current {
                        b.year = attr(&e, "value").and_then(|v| v.parse().ok());
                    }
                }
                _ => {}
            },
            Event::End(e) => {
                if e.name().as_ref() == b"item"
                    && let Some(b) = current.take()
                {
                    if let Some(item) = b.build() {
                        items.push(item);
                    } else {
                        #[cfg(feature = "tracing")]
                        tracing::debug!("dropping search record without primary name");
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(items)
}

/// Parse a `/thing?stats=1` response document.
///
/// Records missing their primary `<name type="primary">` are dropped without
/// aborting their siblings.
pub fn parse_things(xml: &str) -> Result<Vec<BggThing>, ShelfError> {
    #[derive(Default)]
    struct Builder {
        thing: BggThing,
        has_name: bool,
    }

    let mut reader = Reader::from_str(xml);
    // Descriptions keep interior whitespace; only surrounding text nodes are trimmed.
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<Builder> = None;
    let mut text_element: Option<Vec<u8>> = None;
    let mut in_ranks = false;
    // Version listings nest their own <item> elements inside a thing; track
    // the depth so an inner close cannot pop the outer builder.
    let mut nested_items = 0u32;

    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Start(e) if e.name().as_ref() == b"item" => {
                if current.is_none() {
                    let mut b = Builder::default();
                    b.thing.id = attr(&e, "id").unwrap_or_default();
                    current = Some(b);
                } else {
                    nested_items += 1;
                }
            }
            Event::Start(e) | Event::Empty(e) => {
                let name = e.name().as_ref().to_vec();
                match name.as_slice() {
                    b"name" => {
                        if let Some(ref mut b) = current
                            && attr(&e, "type").as_deref() == Some("primary")
                            && let Some(value) = attr_unescaped(&e, "value")
                        {
                            b.thing.name = value;
                            b.has_name = true;
                        }
                    }
                    b"yearpublished" => {
                        if let Some(ref mut b) = current {
                            b.thing.year = attr(&e, "value").and_then(|v| v.parse().ok());
                        }
                    }
                    b"minplayers" => {
                        if let Some(ref mut b) = current {
                            b.thing.min_players = attr(&e, "value").and_then(|v| v.parse().ok());
                        }
                    }
                    b"maxplayers" => {
                        if let Some(ref mut b) = current {
                            b.thing.max_players = attr(&e, "value").and_then(|v| v.parse().ok());
                        }
                    }
                    b"minplaytime" => {
                        if let Some(ref mut b) = current {
                            b.thing.min_playtime = attr(&e, "value").and_then(|v| v.parse().ok());
                        }
                    }
                    b"maxplaytime" => {
                        if let Some(ref mut b) = current {
                            b.thing.max_playtime = attr(&e, "value").and_then(|v| v.parse().ok());
                        }
                    }
                    b"minage" => {
                        if let Some(ref mut b) = current {
                            b.thing.min_age = attr(&e, "value").and_then(|v| v.parse().ok());
                        }
                    }
                    b"average" => {
                        if let Some(ref mut b) = current {
                            b.thing.average = attr(&e, "value").and_then(|v| v.parse().ok());
                        }
                    }
                    b"usersrated" => {
                        if let Some(ref mut b) = current {
                            b.thing.users_rated = attr(&e, "value").and_then(|v| v.parse().ok());
                        }
                    }
                    b"averageweight" => {
                        if let Some(ref mut b) = current {
                            b.thing.average_weight = attr(&e, "value").and_then(|v| v.parse().ok());
                        }
                    }
                    b"owned" => {
                        if let Some(ref mut b) = current {
                            b.thing.owned = attr(&e, "value").and_then(|v| v.parse().ok());
                        }
                    }
                    b"ranks" => in_ranks = true,
                    b"rank" => {
                        // Only the overall subtype rank feeds popularity;
                        // family ranks (strategygames, ...) are ignored.
                        if in_ranks
                            && let Some(ref mut b) = current
                            && attr(&e, "name").as_deref() == Some("boardgame")
                        {
                            b.thing.rank = attr(&e, "value").and_then(|v| v.parse().ok());
                        }
                    }
                    b"link" => {
                        if let Some(ref mut b) = current
                            && let (Some(link_type), Some(id), Some(value)) = (
                                attr(&e, "type"),
                                attr(&e, "id"),
                                attr_unescaped(&e, "value"),
                            )
                        {
                            b.thing.links.push(BggLink {
                                link_type,
                                id,
                                name: value,
                            });
                        }
                    }
                    b"description" | b"image" | b"thumbnail" => {
                        text_element = Some(name);
                    }
                    _ => {}
                }
            }
            Event::Text(e) => {
                if let (Some(element), Some(b)) = (&text_element, &mut current) {
                    let text = e.unescape().map(|t| t.into_owned()).unwrap_or_default();
                    if !text.is_empty() {
                        match element.as_slice() {
                            // Descriptions arrive double-escaped; resolve the
                            // second level after the parser's own pass.
                            b"description" => {
                                b.thing.description = Some(unescape_entities(&text));
                            }
                            b"image" => b.thing.image = Some(text),
                            b"thumbnail" => b.thing.thumbnail = Some(text),
                            _ => {}
                        }
                    }
                }
            }
            Event::CData(e) => {
                if let (Some(element), Some(b)) = (&text_element, &mut current)
                    && element.as_slice() == b"description"
                {
                    let text = unescape_entities(&String::from_utf8_lossy(&e));
                    if !text.is_empty() {
                        b.thing.description = Some(text);
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"item" => {
                    if nested_items > 0 {
                        nested_items -= 1;
                    } else if let Some(b) = current.take() {
                        if b.has_name {
                            items.push(b.thing);
                        } else {
                            #[cfg(feature = "tracing")]
                            tracing::debug!(id = %b.thing.id, "dropping thing without primary name");
                        }
                    }
                }
                b"ranks" => in_ranks = false,
                b"description" | b"image" | b"thumbnail" => text_element = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(items)
}

/// Parse a `/hot` response document; output is sorted rank-ascending.
pub fn parse_hot(xml: &str) -> Result<Vec<BggHotItem>, ShelfError> {
    #[derive(Default)]
    struct Builder {
        id: Option<String>,
        rank: Option<u32>,
        name: Option<String>,
        year: Option<i32>,
        thumbnail: Option<String>,
    }

    impl Builder {
        fn build(self) -> Option<BggHotItem> {
            Some(BggHotItem {
                id: self.id?,
                rank: self.rank?,
                name: self.name?,
                year: self.year,
                thumbnail: self.thumbnail,
            })
        }
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items: Vec<BggHotItem> = Vec::new();
    let mut current: Option<Builder> = None;

    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"item" => {
                    current = Some(Builder {
                        id: attr(&e, "id"),
                        rank: attr(&e, "rank").and_then(|v| v.parse().ok()),
                        ..Default::default()
                    });
                }
                b"name" => {
                    if let Some(ref mut b) = current {
                        b.name = attr_unescaped(&e, "value");
                    }
                }
                b"yearpublished" => {
                    if let Some(ref mut b) = current {
                        b.year = attr(&e, "value").and_then(|v| v.parse().ok());
                    }
                }
                b"thumbnail" => {
                    if let Some(ref mut b) = current {
                        b.thumbnail = attr(&e, "value");
                    }
                }
                _ => {}
            },
            Event::End(e) => {
                if e.name().as_ref() == b"item"
                    && let Some(b) = current.take()
                    && let Some(item) = b.build()
                {
                    items.push(item);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    items.sort_by_key(|i| i.rank);
    Ok(items)
}
