/// Game catalog abstraction
///
/// The similarity search only needs two read-only lookups from a catalog:
/// a free-text search and a by-genre listing. Both return the first page of
/// results only.
use crate::{error::AppResult, models::Game};

pub mod rawg;

pub use rawg::RawgCatalog;

/// Trait for game catalog backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GameCatalog: Send + Sync {
    /// Search games by name, returning at most `page_size` results in
    /// catalog relevance order
    async fn search_games(&self, query: &str, page_size: u32) -> AppResult<Vec<Game>>;

    /// List games belonging to the genre identified by `genre_slug`
    async fn games_by_genre(&self, genre_slug: &str, page_size: u32) -> AppResult<Vec<Game>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
