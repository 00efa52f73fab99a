//! Similar-game ranking.
//!
//! A query resolves to one primary game. Candidates are gathered from the
//! primary's leading genres and ranked by how many tags they share with it.

use std::collections::HashSet;

use crate::{
    error::AppResult,
    models::{Game, ScoredGame, SimilarGames},
    services::providers::GameCatalog,
};

/// Page size of the text search; only the top hit becomes the primary game
pub const PRIMARY_PAGE_SIZE: u32 = 1;
/// Number of leading genres used to gather candidates
pub const MAX_GENRES: usize = 3;
/// Page size of each genre listing
pub const GENRE_PAGE_SIZE: u32 = 20;
/// Number of similar games kept after ranking
pub const MAX_SIMILAR: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The text search returned nothing
    NotFound,
    Found(SimilarGames),
}

/// Finds the primary game for `query` and the games most similar to it.
///
/// Genre listings are fetched one after another. Any catalog failure aborts
/// the whole search; no partial result is produced.
pub async fn find_similar_games(
    catalog: &dyn GameCatalog,
    query: &str,
) -> AppResult<SearchOutcome> {
    let Some(primary) = catalog
        .search_games(query, PRIMARY_PAGE_SIZE)
        .await?
        .into_iter()
        .next()
    else {
        tracing::info!(query = %query, "No primary game found");
        return Ok(SearchOutcome::NotFound);
    };

    let genres: Vec<&str> = primary.genre_slugs().take(MAX_GENRES).collect();

    let mut pool = Vec::new();
    for genre in &genres {
        let games = catalog.games_by_genre(genre, GENRE_PAGE_SIZE).await?;
        pool.extend(games);
    }

    let candidates = dedup_candidates(pool, primary.id);
    let similar = rank_candidates(&primary, candidates);

    tracing::info!(
        query = %query,
        primary_id = primary.id,
        genres = ?genres,
        similar = similar.len(),
        "Similarity search completed"
    );

    Ok(SearchOutcome::Found(SimilarGames { primary, similar }))
}

/// Drops repeated ids (first occurrence wins) and the primary game itself
fn dedup_candidates(pool: Vec<Game>, primary_id: u64) -> Vec<Game> {
    let mut seen = HashSet::new();
    pool.into_iter()
        .filter(|g| g.id != primary_id && seen.insert(g.id))
        .collect()
}

/// Number of the candidate's tags that also tag the primary game
fn shared_tag_count(primary_tags: &HashSet<&str>, candidate: &Game) -> u32 {
    candidate
        .tag_slugs()
        .filter(|tag| primary_tags.contains(tag))
        .count() as u32
}

/// Scores candidates, drops those sharing no tag and keeps the best
/// [`MAX_SIMILAR`]. Equal scores keep candidate order.
fn rank_candidates(primary: &Game, candidates: Vec<Game>) -> Vec<ScoredGame> {
    let primary_tags: HashSet<&str> = primary.tag_slugs().collect();

    let mut scored: Vec<ScoredGame> = candidates
        .into_iter()
        .map(|game| {
            let score = shared_tag_count(&primary_tags, &game);
            ScoredGame { game, score }
        })
        .filter(|s| s.score > 0)
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_SIMILAR);
    scored
}
