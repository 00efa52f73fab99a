use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the application router: the two HTML screens, their form actions
/// and the JSON API under /api/v1
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/search", post(handlers::search))
        .route("/recent", post(handlers::recent_search))
        .route("/favorites/toggle", post(handlers::toggle_favorite))
        .route("/view/toggle", post(handlers::toggle_view))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/search", post(handlers::api_search))
        .route("/recent-searches", post(handlers::api_recent_search))
        .route("/favorites/:id/toggle", post(handlers::api_toggle_favorite))
        .route("/view/toggle", post(handlers::api_toggle_view))
}
