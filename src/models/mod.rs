use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub mod favorites;
pub mod recent_searches;

pub use favorites::Favorites;
pub use recent_searches::{RecentSearches, RECENT_SEARCHES_LIMIT};

/// A genre or tag reference attached to a game (e.g. `{"slug": "open-world"}`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Taxon {
    pub slug: String,
    /// Remaining catalog fields (id, name, games_count...), kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Taxon {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            extra: Map::new(),
        }
    }
}

/// A game as returned by the catalog
///
/// Games are never constructed from scratch by the application; they are
/// decoded from catalog responses or from persisted favorites. Fields the
/// application does not use are preserved in `extra` so a favorite is stored
/// as the full catalog object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<Taxon>,
    #[serde(default)]
    pub tags: Option<Vec<Taxon>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Game {
    /// Genre slugs in catalog order
    pub fn genre_slugs(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(|g| g.slug.as_str())
    }

    /// Tag slugs in catalog order (empty when the catalog sent no tags)
    pub fn tag_slugs(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().flatten().map(|t| t.slug.as_str())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A candidate game with the number of tags it shares with the primary game
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredGame {
    #[serde(flatten)]
    pub game: Game,
    pub score: u32,
}

/// Outcome of a successful similarity search: the primary game followed by
/// its ranked neighbours
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimilarGames {
    pub primary: Game,
    pub similar: Vec<ScoredGame>,
}

impl SimilarGames {
    /// The displayed result list: primary first, then similar games by rank
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        std::iter::once(&self.primary).chain(self.similar.iter().map(|s| &s.game))
    }

    pub fn find(&self, id: u64) -> Option<&Game> {
        self.games().find(|g| g.id == id)
    }
}

/// Which screen is displayed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Search,
    Favorites,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Search => ViewMode::Favorites,
            ViewMode::Favorites => ViewMode::Search,
        }
    }
}

// ============================================================================
// RAWG API Types
// ============================================================================

/// One page of `GET /games`
#[derive(Debug, Clone, Deserialize)]
pub struct GamesPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<Game>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_deserialization_keeps_unknown_fields() {
        let json = r#"{
            "id": 3498,
            "name": "Grand Theft Auto V",
            "slug": "grand-theft-auto-v",
            "background_image": "https://media.rawg.io/media/games/gta5.jpg",
            "rating": 4.47,
            "genres": [{"id": 4, "name": "Action", "slug": "action"}],
            "tags": [{"id": 31, "name": "Singleplayer", "slug": "singleplayer"}]
        }"#;

        let game: Game = serde_json::from_str(json).unwrap();
        assert_eq!(game.id, 3498);
        assert_eq!(game.slug, "grand-theft-auto-v");
        assert_eq!(game.genre_slugs().collect::<Vec<_>>(), vec!["action"]);
        assert_eq!(game.tag_slugs().collect::<Vec<_>>(), vec!["singleplayer"]);
        assert_eq!(game.extra["rating"], serde_json::json!(4.47));
        assert_eq!(game.genres[0].extra["name"], "Action");

        let back = serde_json::to_value(&game).unwrap();
        assert_eq!(back["rating"], serde_json::json!(4.47));
        assert_eq!(back["genres"][0]["id"], 4);
    }

    #[test]
    fn test_game_without_tags_or_genres() {
        let json = r#"{
            "id": 1,
            "name": "Bare",
            "slug": "bare",
            "background_image": null,
            "genres": null,
            "tags": null
        }"#;

        let game: Game = serde_json::from_str(json).unwrap();
        assert!(game.genres.is_empty());
        assert_eq!(game.tags, None);
        assert_eq!(game.tag_slugs().count(), 0);
        assert_eq!(game.background_image, None);
    }

    #[test]
    fn test_games_page_deserialization() {
        let json = r#"{"count": 2, "next": null, "results": [
            {"id": 1, "name": "A", "slug": "a", "genres": []},
            {"id": 2, "name": "B", "slug": "b", "genres": []}
        ]}"#;

        let page: GamesPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[1].name, "B");
    }

    #[test]
    fn test_similar_games_order() {
        let results = SimilarGames {
            primary: fixtures::game(100, &[], &[]),
            similar: vec![
                ScoredGame {
                    game: fixtures::game(2, &[], &[]),
                    score: 2,
                },
                ScoredGame {
                    game: fixtures::game(3, &[], &[]),
                    score: 1,
                },
            ],
        };

        let ids: Vec<u64> = results.games().map(|g| g.id).collect();
        assert_eq!(ids, vec![100, 2, 3]);
        assert_eq!(results.games().count(), 3);
        assert_eq!(results.find(3).map(|g| g.id), Some(3));
        assert!(results.find(4).is_none());
    }

    #[test]
    fn test_scored_game_serializes_flat() {
        let scored = ScoredGame {
            game: fixtures::game(5, &["rpg"], &["fantasy"]),
            score: 1,
        };

        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["id"], 5);
        assert_eq!(value["score"], 1);
    }

    #[test]
    fn test_view_mode_toggle() {
        assert_eq!(ViewMode::default(), ViewMode::Search);
        assert_eq!(ViewMode::Search.toggled(), ViewMode::Favorites);
        assert_eq!(ViewMode::Favorites.toggled(), ViewMode::Search);
        assert_eq!(serde_json::to_string(&ViewMode::Favorites).unwrap(), "\"favorites\"");
    }
}
