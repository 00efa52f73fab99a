//! Application state and the user actions that mutate it.
//!
//! The controller owns everything the two screens render. Favorites and
//! recent searches are restored from [`Storage`] on startup and written back
//! in full after each change; everything else lives only in memory.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    db::{load_list, save_list, Storage, StorageKey},
    error::{AppError, AppResult},
    models::{Favorites, Game, RecentSearches, SimilarGames, ViewMode},
    services::{
        providers::GameCatalog,
        similarity::{find_similar_games, SearchOutcome},
    },
};

/// Shown when the text search has no hit
pub const NOT_FOUND_NOTICE: &str = "No game found!";

pub struct Controller {
    catalog: Arc<dyn GameCatalog>,
    storage: Arc<dyn Storage>,
    query: String,
    results: Option<SimilarGames>,
    favorites: Favorites,
    recent_searches: RecentSearches,
    view: ViewMode,
    notice: Option<String>,
}

/// Serializable copy of the controller state
#[derive(Debug, Serialize)]
pub struct StateSnapshot<'a> {
    pub view: ViewMode,
    pub query: &'a str,
    pub results: Option<&'a SimilarGames>,
    pub favorites: &'a [Game],
    pub recent_searches: &'a [String],
    pub notice: Option<&'a str>,
}

impl Controller {
    /// Creates a controller with persisted favorites and recent searches
    /// loaded from `storage`
    pub async fn restore(catalog: Arc<dyn GameCatalog>, storage: Arc<dyn Storage>) -> Self {
        let favorites =
            Favorites::from_games(load_list(storage.as_ref(), StorageKey::Favorites).await);
        let recent_searches = RecentSearches::from_queries(
            load_list(storage.as_ref(), StorageKey::RecentSearches).await,
        );

        tracing::info!(
            favorites = favorites.len(),
            recent_searches = recent_searches.len(),
            storage = storage.name(),
            "Restored persisted state"
        );

        Self {
            catalog,
            storage,
            query: String::new(),
            results: None,
            favorites,
            recent_searches,
            view: ViewMode::default(),
            notice: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> Option<&SimilarGames> {
        self.results.as_ref()
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn recent_searches(&self) -> &RecentSearches {
        &self.recent_searches
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn toggle_view(&mut self) -> ViewMode {
        self.view = self.view.toggled();
        self.view
    }

    /// Sets the pending query text
    pub fn select_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Runs a similarity search for the pending query.
    ///
    /// An empty query does nothing. Any pending notice is cleared. Catalog
    /// failures are logged and leave results and history untouched; only
    /// persistence failures are returned.
    pub async fn submit_query(&mut self) -> AppResult<()> {
        if self.query.is_empty() {
            return Ok(());
        }
        let query = self.query.clone();
        self.notice = None;

        match find_similar_games(self.catalog.as_ref(), &query).await {
            Ok(SearchOutcome::NotFound) => {
                self.results = None;
                self.notice = Some(NOT_FOUND_NOTICE.to_string());
                Ok(())
            }
            Ok(SearchOutcome::Found(results)) => {
                self.results = Some(results);
                self.recent_searches.push(&query);
                self.save_recent_searches().await
            }
            Err(e) => {
                tracing::error!(
                    query = %query,
                    provider = self.catalog.name(),
                    error = %e,
                    "Search failed, keeping previous results"
                );
                Ok(())
            }
        }
    }

    /// Re-runs a search from history
    pub async fn select_recent_search(&mut self, text: impl Into<String>) -> AppResult<()> {
        self.select_query(text);
        self.submit_query().await
    }

    /// Adds or removes `game` from favorites and persists the list.
    /// Returns whether the game is a favorite afterwards.
    pub async fn toggle_favorite(&mut self, game: &Game) -> AppResult<bool> {
        let favorited = self.favorites.toggle(game);
        tracing::debug!(game_id = game.id, favorited, "Favorite toggled");
        self.save_favorites().await?;
        Ok(favorited)
    }

    /// Toggles a game shown on either screen, looked up by id
    pub async fn toggle_favorite_by_id(&mut self, id: u64) -> AppResult<bool> {
        let game = self
            .results
            .as_ref()
            .and_then(|r| r.find(id))
            .or_else(|| self.favorites.get(id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Game {} is not displayed", id)))?;

        self.toggle_favorite(&game).await
    }

    /// Returns the pending notice and clears it so it is displayed once
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn snapshot(&self) -> StateSnapshot<'_> {
        StateSnapshot {
            view: self.view,
            query: &self.query,
            results: self.results.as_ref(),
            favorites: self.favorites.as_slice(),
            recent_searches: self.recent_searches.as_slice(),
            notice: self.notice.as_deref(),
        }
    }

    async fn save_favorites(&self) -> AppResult<()> {
        save_list(
            self.storage.as_ref(),
            StorageKey::Favorites,
            self.favorites.as_slice(),
        )
        .await
    }

    async fn save_recent_searches(&self) -> AppResult<()> {
        save_list(
            self.storage.as_ref(),
            StorageKey::RecentSearches,
            self.recent_searches.as_slice(),
        )
        .await
    }
}
