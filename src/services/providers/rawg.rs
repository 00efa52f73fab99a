/// RAWG video game database provider
///
/// API Flow:
/// 1. Text search: /games?search=<text>&page_size=N
/// 2. Genre listing: /games?genres=<slug>&page_size=N
///
/// Every request carries the API key as the `key` query parameter. RAWG
/// answers an invalid or missing key with 401, which surfaces here as an
/// `ExternalApi` error like any other non-2xx status.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{Game, GamesPage},
    services::providers::GameCatalog,
};

#[derive(Clone)]
pub struct RawgCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl RawgCatalog {
    /// Creates a RAWG catalog client with the given request timeout
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn games_url(&self) -> String {
        format!("{}/games", self.api_url)
    }

    /// Fetches one page of `/games` filtered by a single parameter
    async fn fetch_games(&self, filter: (&str, &str), page_size: u32) -> AppResult<Vec<Game>> {
        let page_size = page_size.to_string();

        let response = self
            .http_client
            .get(self.games_url())
            .query(&[
                ("key", self.api_key.as_str()),
                filter,
                ("page_size", page_size.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                filter = filter.0,
                value = %filter.1,
                status = %status,
                "RAWG request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "RAWG API returned status {}: {}",
                status, body
            )));
        }

        let page: GamesPage = response.json().await?;
        Ok(page.results)
    }
}

#[async_trait::async_trait]
impl GameCatalog for RawgCatalog {
    async fn search_games(&self, query: &str, page_size: u32) -> AppResult<Vec<Game>> {
        let games = self.fetch_games(("search", query), page_size).await?;

        tracing::info!(
            query = %query,
            results = games.len(),
            provider = "rawg",
            "Game search completed"
        );

        Ok(games)
    }

    async fn games_by_genre(&self, genre_slug: &str, page_size: u32) -> AppResult<Vec<Game>> {
        let games = self.fetch_games(("genres", genre_slug), page_size).await?;

        tracing::debug!(
            genre = %genre_slug,
            results = games.len(),
            provider = "rawg",
            "Genre listing fetched"
        );

        Ok(games)
    }

    fn name(&self) -> &'static str {
        "rawg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};

    type Received = Arc<Mutex<Vec<HashMap<String, String>>>>;

    /// Serves `/api/games` on an ephemeral port, recording each query string
    /// and answering with `status`
    async fn spawn_fake_rawg(status: StatusCode) -> (String, Received) {
        let received: Received = Arc::new(Mutex::new(Vec::new()));
        let recorder = received.clone();

        let app = Router::new().route(
            "/api/games",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let recorder = recorder.clone();
                async move {
                    recorder.lock().unwrap().push(params);
                    let body: Value = if status.is_success() {
                        json!({
                            "count": 1,
                            "results": [{
                                "id": 3,
                                "name": "Portal",
                                "slug": "portal",
                                "rating": 4.5,
                                "genres": [{ "slug": "puzzle" }],
                                "tags": [{ "slug": "physics" }]
                            }]
                        })
                    } else {
                        json!({ "error": "The key parameter is not provided" })
                    };
                    (status, Json(body))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/api", addr), received)
    }

    fn create_test_catalog(api_url: &str) -> RawgCatalog {
        RawgCatalog::new(
            "test_key".to_string(),
            api_url.to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_games_url() {
        let catalog = create_test_catalog("https://api.rawg.io/api");
        assert_eq!(catalog.games_url(), "https://api.rawg.io/api/games");
    }

    #[test]
    fn test_games_url_trailing_slash() {
        let catalog = create_test_catalog("http://test.local/api/");
        assert_eq!(catalog.games_url(), "http://test.local/api/games");
    }

    #[test]
    fn test_provider_name() {
        let catalog = create_test_catalog("http://test.local");
        assert_eq!(catalog.name(), "rawg");
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_an_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let catalog = create_test_catalog("http://127.0.0.1:9");
        let result = catalog.search_games("zelda", 1).await;
        assert!(matches!(result, Err(AppError::HttpClient(_))));
    }

    #[tokio::test]
    async fn test_search_games_sends_key_search_and_page_size() {
        let (api_url, received) = spawn_fake_rawg(StatusCode::OK).await;
        let catalog = create_test_catalog(&api_url);

        let games = catalog.search_games("zelda breath", 1).await.unwrap();

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, 3);
        assert_eq!(games[0].genre_slugs().collect::<Vec<_>>(), vec!["puzzle"]);
        assert_eq!(games[0].tag_slugs().collect::<Vec<_>>(), vec!["physics"]);
        assert_eq!(games[0].extra.get("rating"), Some(&json!(4.5)));

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let params = &received[0];
        assert_eq!(params.get("key").map(String::as_str), Some("test_key"));
        assert_eq!(params.get("search").map(String::as_str), Some("zelda breath"));
        assert_eq!(params.get("page_size").map(String::as_str), Some("1"));
        assert!(!params.contains_key("genres"));
    }

    #[tokio::test]
    async fn test_games_by_genre_sends_genres_filter() {
        let (api_url, received) = spawn_fake_rawg(StatusCode::OK).await;
        let catalog = create_test_catalog(&api_url);

        let games = catalog.games_by_genre("action", 20).await.unwrap();
        assert_eq!(games.len(), 1);

        let received = received.lock().unwrap();
        let params = &received[0];
        assert_eq!(params.get("key").map(String::as_str), Some("test_key"));
        assert_eq!(params.get("genres").map(String::as_str), Some("action"));
        assert_eq!(params.get("page_size").map(String::as_str), Some("20"));
        assert!(!params.contains_key("search"));
    }

    #[tokio::test]
    async fn test_unauthorized_is_external_api_error() {
        let (api_url, _received) = spawn_fake_rawg(StatusCode::UNAUTHORIZED).await;
        let catalog = create_test_catalog(&api_url);

        match catalog.search_games("zelda", 1).await {
            Err(AppError::ExternalApi(msg)) => {
                assert!(msg.contains("401"), "unexpected message: {}", msg);
                assert!(msg.contains("key parameter"), "unexpected message: {}", msg);
            }
            other => panic!("expected ExternalApi error, got {:?}", other),
        }
    }
}
