//! Top gainers and losers over the company directory.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::projection::round2;
use crate::types::Series;
use crate::AppState;

/// How many gainers and losers to report.
const TOP_K: usize = 10;

/// One symbol's last-day move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMover {
    pub symbol: String,
    pub company_name: String,
    pub current_price: f64,
    pub price_change: f64,
    pub percent_change: f64,
    pub volume: u64,
}

/// Gainers and losers, each sorted by move size.
#[derive(Debug, Serialize, Deserialize)]
pub struct MoversResponse {
    pub gainers: Vec<StockMover>,
    pub losers: Vec<StockMover>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_movers))
}

/// Batch-fetch the directory and rank by last-day percentage change.
/// Symbols whose fetch failed or whose history is too short are skipped.
async fn get_movers(State(state): State<AppState>) -> Json<MoversResponse> {
    let results = state.history.fetch_many(state.directory.symbols()).await;

    let mut movers = Vec::with_capacity(results.len());
    for (symbol, result) in results {
        let series = match result {
            Ok(series) => series,
            Err(e) => {
                debug!(symbol = %symbol, error = %e, "skipping symbol in movers ranking");
                continue;
            }
        };
        if let Some(mover) = mover_from_series(&state, &symbol, &series) {
            movers.push(mover);
        }
    }

    let mut gainers: Vec<StockMover> = movers
        .iter()
        .filter(|m| m.percent_change > 0.0)
        .cloned()
        .collect();
    gainers.sort_by(|a, b| {
        b.percent_change
            .partial_cmp(&a.percent_change)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    gainers.truncate(TOP_K);

    let mut losers: Vec<StockMover> = movers
        .into_iter()
        .filter(|m| m.percent_change < 0.0)
        .collect();
    losers.sort_by(|a, b| {
        a.percent_change
            .partial_cmp(&b.percent_change)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    losers.truncate(TOP_K);

    Json(MoversResponse { gainers, losers })
}

/// Build a mover entry from the last two bars of a series.
fn mover_from_series(state: &AppState, symbol: &str, series: &Series) -> Option<StockMover> {
    let bars = series.bars();
    if bars.len() < 2 {
        return None;
    }
    let last = bars[bars.len() - 1];
    let prev = bars[bars.len() - 2];
    let price_change = last.close - prev.close;
    let percent_change = price_change / prev.close * 100.0;

    Some(StockMover {
        symbol: symbol.to_string(),
        company_name: state
            .directory
            .name_of(symbol)
            .unwrap_or(symbol)
            .to_string(),
        current_price: round2(last.close),
        price_change: round2(price_change),
        percent_change: round2(percent_change),
        volume: last.volume,
    })
}
