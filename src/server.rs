//! JSON HTTP surface for the rendering layer
//!
//! Every recipe endpoint answers with exactly one of a payload key
//! (`results` / `recipe`) or an `error` message.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::data::{Cuisine, SearchParams};
use crate::service::{FetchError, RecipeOutcome, RecipeService, SearchOutcome};

/// Form options for the cuisine select box
#[derive(Debug, Serialize)]
pub struct CuisineList {
    pub cuisines: Vec<&'static str>,
}

/// Builds the router over a shared service
pub fn router(service: Arc<RecipeService>) -> Router {
    Router::new()
        .route("/recipes", get(search_recipes))
        .route("/recipes/{id}", get(get_recipe))
        .route("/cuisines", get(list_cuisines))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serves the router on `bind` until Ctrl-C
pub async fn serve(bind: SocketAddr, service: Arc<RecipeService>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "recipe server listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}

fn status_for(err: &FetchError) -> StatusCode {
    if err.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// Reads raw pairs so a repeated key keeps its last value instead of
/// being rejected before the handler runs.
async fn search_recipes(
    State(service): State<Arc<RecipeService>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<SearchOutcome>) {
    let params = SearchParams::from_pairs(pairs);
    let result = service.search(&params).await;
    let status = result.as_ref().err().map_or(StatusCode::OK, status_for);
    (status, Json(result.into()))
}

async fn get_recipe(
    State(service): State<Arc<RecipeService>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<RecipeOutcome>) {
    let result = service.recipe(&id).await;
    let status = result.as_ref().err().map_or(StatusCode::OK, status_for);
    (status, Json(result.into()))
}

async fn list_cuisines() -> Json<CuisineList> {
    Json(CuisineList {
        cuisines: Cuisine::all().iter().map(Cuisine::as_str).collect(),
    })
}

async fn health() -> &'static str {
    "ok"
}
