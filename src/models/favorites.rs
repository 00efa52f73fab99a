use serde::{Deserialize, Serialize};

use super::Game;

/// User-curated favorite games, in the order they were added, unique by id
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Favorites {
    games: Vec<Game>,
}

impl Favorites {
    /// Creates an empty favorites list
    pub fn new() -> Self {
        Self { games: Vec::new() }
    }

    /// Builds favorites from persisted records, dropping repeated ids
    /// (first occurrence wins)
    pub fn from_games(games: Vec<Game>) -> Self {
        let mut favorites = Self::new();
        for game in games {
            if !favorites.contains(game.id) {
                favorites.games.push(game);
            }
        }
        favorites
    }

    /// Adds the game if absent, removes it if present.
    /// Returns whether the game is a favorite afterwards.
    pub fn toggle(&mut self, game: &Game) -> bool {
        if self.contains(game.id) {
            self.games.retain(|g| g.id != game.id);
            false
        } else {
            self.games.push(game.clone());
            true
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.games.iter().any(|g| g.id == id)
    }

    pub fn get(&self, id: u64) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.iter()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn as_slice(&self) -> &[Game] {
        &self.games
    }
}
