use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    Extension, Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::AppResult, middleware::request_id::RequestId, views};

use super::AppState;

// Request types

/// Search box or recent-search tile submission
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteForm {
    pub id: u64,
}

// HTML handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Renders the current screen. A pending notice is shown on this render only.
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let mut controller = state.inner.lock().await;
    let html = views::render_page(&controller, &state.site_url)?;
    controller.take_notice();
    Ok(Html(html))
}

/// Submits the search box
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<QueryRequest>,
) -> AppResult<Redirect> {
    tracing::info!(request_id = %request_id, query = %form.query, "Processing search");

    let mut controller = state.inner.lock().await;
    controller.select_query(form.query);
    controller.submit_query().await?;
    Ok(Redirect::to("/"))
}

/// Re-runs a query from the recent searches list
pub async fn recent_search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<QueryRequest>,
) -> AppResult<Redirect> {
    tracing::info!(request_id = %request_id, query = %form.query, "Re-running recent search");

    let mut controller = state.inner.lock().await;
    controller.select_recent_search(form.query).await?;
    Ok(Redirect::to("/"))
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Form(form): Form<FavoriteForm>,
) -> AppResult<Redirect> {
    let mut controller = state.inner.lock().await;
    controller.toggle_favorite_by_id(form.id).await?;
    Ok(Redirect::to("/"))
}

pub async fn toggle_view(State(state): State<AppState>) -> Redirect {
    state.inner.lock().await.toggle_view();
    Redirect::to("/")
}

// JSON handlers

/// Current state as JSON
pub async fn get_state(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let controller = state.inner.lock().await;
    Ok(Json(serde_json::to_value(controller.snapshot())?))
}

pub async fn api_search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<QueryRequest>,
) -> AppResult<Json<Value>> {
    tracing::info!(request_id = %request_id, query = %request.query, "Processing search");

    let mut controller = state.inner.lock().await;
    controller.select_query(request.query);
    controller.submit_query().await?;
    Ok(Json(serde_json::to_value(controller.snapshot())?))
}

pub async fn api_recent_search(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> AppResult<Json<Value>> {
    let mut controller = state.inner.lock().await;
    controller.select_recent_search(request.query).await?;
    Ok(Json(serde_json::to_value(controller.snapshot())?))
}

pub async fn api_toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Value>> {
    let mut controller = state.inner.lock().await;
    controller.toggle_favorite_by_id(id).await?;
    Ok(Json(serde_json::to_value(controller.snapshot())?))
}

pub async fn api_toggle_view(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let mut controller = state.inner.lock().await;
    controller.toggle_view();
    Ok(Json(serde_json::to_value(controller.snapshot())?))
}
