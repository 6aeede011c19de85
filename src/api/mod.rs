pub mod health;
pub mod movers;
pub mod predict;
pub mod search;
pub mod volatility;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/predict", predict::router())
        .nest("/api/search", search::router())
        .nest("/api/movers", movers::router())
        .nest("/api/volatility", volatility::router())
}
