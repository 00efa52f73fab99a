//! Server-side rendering of the search and favorites screens.
//!
//! Rendering is a pure function of the controller state; it never mutates it.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::{
    error::AppResult,
    models::{Game, ViewMode},
    services::controller::Controller,
};

const PAGE_TEMPLATE: &str = include_str!("index.html.jinja");
const CSS_STYLES: &str = include_str!("style.css");

/// One row of the search results list
#[derive(Serialize)]
struct ResultRow<'a> {
    id: u64,
    name: &'a str,
    url: String,
    favorite: bool,
}

/// One card of the favorites grid
#[derive(Serialize)]
struct FavoriteCard<'a> {
    name: &'a str,
    url: String,
    image: Option<&'a str>,
}

/// Canonical catalog page for a game
pub fn game_url(site_url: &str, game: &Game) -> String {
    format!("{}/games/{}", site_url.trim_end_matches('/'), game.slug)
}

/// Renders the full page for the current view.
///
/// The `.html` template name turns on HTML auto-escaping for every
/// interpolated value.
pub fn render_page(controller: &Controller, site_url: &str) -> AppResult<String> {
    let mut env = Environment::new();
    env.add_template("index.html", PAGE_TEMPLATE)?;
    let template = env.get_template("index.html")?;

    let view = match controller.view() {
        ViewMode::Search => "search",
        ViewMode::Favorites => "favorites",
    };

    let favorites = controller.favorites();
    let results: Vec<ResultRow> = controller
        .results()
        .into_iter()
        .flat_map(|r| r.games())
        .map(|game| ResultRow {
            id: game.id,
            name: &game.name,
            url: game_url(site_url, game),
            favorite: favorites.contains(game.id),
        })
        .collect();

    let favorite_cards: Vec<FavoriteCard> = favorites
        .iter()
        .map(|game| FavoriteCard {
            name: &game.name,
            url: game_url(site_url, game),
            image: game.background_image.as_deref(),
        })
        .collect();

    let recent_searches: Vec<&str> = controller.recent_searches().iter().collect();

    let html = template.render(context! {
        view,
        query => controller.query(),
        results,
        favorites => favorite_cards,
        recent_searches,
        notice => controller.notice(),
        css_styles => CSS_STYLES,
    })?;

    Ok(html)
}
