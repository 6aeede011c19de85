//! Prediction endpoint.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::types::Forecast;
use crate::AppState;

/// Query parameters for the predict endpoint.
#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    /// Number of future days to project. Defaults from configuration.
    pub horizon: Option<u32>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/:symbol", get(get_prediction))
}

/// Fetch a symbol's history and run the full analysis.
async fn get_prediction(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PredictQuery>,
) -> Result<Json<Forecast>, AppError> {
    let horizon = query.horizon.unwrap_or(state.config.default_horizon);
    let series = state.history.fetch(&symbol).await?;
    let forecast = state.engine.analyze(&symbol, &series, horizon)?;
    Ok(Json(forecast))
}
