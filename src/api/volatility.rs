//! Annualized volatility endpoints.
//!
//! The engine itself works with raw window volatility; the annualized
//! (x sqrt 252) form lives here, in the ranking collaborator, only.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::indicators::{pct_returns, sample_stdev};
use crate::engine::projection::round2;
use crate::error::AppError;
use crate::types::Series;
use crate::AppState;

/// Trading days per year used for annualization.
const TRADING_DAYS: f64 = 252.0;
/// Rolling volatility window in returns.
const ROLLING_WINDOW: usize = 21;
/// Default ranking size.
const DEFAULT_LIMIT: usize = 10;

/// One rolling-volatility observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatilityPoint {
    pub date: NaiveDate,
    pub volatility: f64,
}

/// Volatility analysis for one symbol.
#[derive(Debug, Serialize)]
pub struct VolatilityProfile {
    pub symbol: String,
    pub company_name: String,
    pub current_price: f64,
    /// Annualized volatility over the full fetched history, percent.
    pub historical_volatility: f64,
    pub avg_volatility: f64,
    pub max_volatility: f64,
    pub min_volatility: f64,
    pub risk_level: &'static str,
    pub data_points: Vec<VolatilityPoint>,
    pub data_period: String,
}

/// Ranking entry for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct VolatilityRank {
    pub symbol: String,
    pub company_name: String,
    pub volatility: f64,
    pub risk_level: &'static str,
    pub current_price: f64,
}

#[derive(Debug, Serialize)]
pub struct VolatilityRanking {
    pub most_volatile: Vec<VolatilityRank>,
    pub least_volatile: Vec<VolatilityRank>,
    pub total_analyzed: usize,
}

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    pub limit: Option<usize>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ranking", get(get_ranking))
        .route("/:symbol", get(get_volatility))
}

/// Annualized volatility percentage from a close series.
fn annualized_volatility(closes: &[f64]) -> f64 {
    sample_stdev(&pct_returns(closes)) * TRADING_DAYS.sqrt()
}

/// Categorize risk by annualized volatility.
fn risk_level(volatility: f64) -> &'static str {
    if volatility >= 30.0 {
        "High"
    } else if volatility >= 15.0 {
        "Medium"
    } else {
        "Low"
    }
}

/// Rolling annualized volatility, one point per bar once the window fills.
fn rolling_volatility(series: &Series, window: usize) -> Vec<VolatilityPoint> {
    let closes = series.closes();
    let returns = pct_returns(&closes);
    let mut points = Vec::new();
    for end in window..=returns.len() {
        let vol = sample_stdev(&returns[end - window..end]) * TRADING_DAYS.sqrt();
        // Return i covers bars i and i+1; the window ending at return
        // end-1 is dated by bar end.
        points.push(VolatilityPoint {
            date: series.bars()[end].date,
            volatility: round2(vol),
        });
    }
    points
}

/// Volatility analysis for a single symbol.
async fn get_volatility(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<VolatilityProfile>, AppError> {
    let series = state.history.fetch(&symbol).await?;
    if series.is_empty() {
        return Err(AppError::NotFound(format!("no data found for {symbol}")));
    }
    if series.len() < 3 {
        return Err(AppError::BadRequest(format!(
            "insufficient data for {symbol}"
        )));
    }

    let closes = series.closes();
    let historical = annualized_volatility(&closes);
    let window = ROLLING_WINDOW.min(closes.len() - 1);
    let points = rolling_volatility(&series, window);

    let (avg, max, min) = if points.is_empty() {
        (historical, historical, historical)
    } else {
        let sum: f64 = points.iter().map(|p| p.volatility).sum();
        let max = points.iter().map(|p| p.volatility).fold(f64::MIN, f64::max);
        let min = points.iter().map(|p| p.volatility).fold(f64::MAX, f64::min);
        (sum / points.len() as f64, max, min)
    };

    let symbol = symbol.to_uppercase();
    let company_name = state
        .directory
        .name_of(&symbol)
        .unwrap_or(symbol.as_str())
        .to_string();

    Ok(Json(VolatilityProfile {
        current_price: round2(closes[closes.len() - 1]),
        historical_volatility: round2(historical),
        avg_volatility: round2(avg),
        max_volatility: round2(max),
        min_volatility: round2(min),
        risk_level: risk_level(historical),
        data_points: points,
        data_period: format!("{} trading days", series.len()),
        symbol,
        company_name,
    }))
}

/// Directory symbols ranked most and least volatile.
async fn get_ranking(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> Json<VolatilityRanking> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).max(1);
    let results = state.history.fetch_many(state.directory.symbols()).await;

    let mut ranks = Vec::with_capacity(results.len());
    for (symbol, result) in results {
        let series = match result {
            Ok(series) if series.len() > 5 => series,
            Ok(_) => continue,
            Err(e) => {
                debug!(symbol = %symbol, error = %e, "skipping symbol in volatility ranking");
                continue;
            }
        };
        let closes = series.closes();
        let volatility = round2(annualized_volatility(&closes));
        ranks.push(VolatilityRank {
            company_name: state
                .directory
                .name_of(&symbol)
                .unwrap_or(symbol.as_str())
                .to_string(),
            symbol,
            volatility,
            risk_level: risk_level(volatility),
            current_price: round2(closes[closes.len() - 1]),
        });
    }

    let total_analyzed = ranks.len();
    ranks.sort_by(|a, b| {
        b.volatility
            .partial_cmp(&a.volatility)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let most_volatile: Vec<VolatilityRank> = ranks.iter().take(limit).cloned().collect();
    ranks.reverse();
    ranks.truncate(limit);

    Json(VolatilityRanking {
        most_volatile,
        least_volatile: ranks,
        total_analyzed,
    })
}
