//! Symbol search endpoint.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::services::SearchMatch;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search))
}

/// Prefix search over the company directory.
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<SearchMatch>> {
    Json(state.directory.search(&params.query))
}
