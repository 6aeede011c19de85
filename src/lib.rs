//! Augur - data-driven stock analysis and price projection server.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use std::sync::Arc;

use config::Config;
use engine::Engine;
use services::{Directory, HistoryService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<Engine>,
    pub history: Arc<HistoryService>,
    pub directory: Arc<Directory>,
}

// Re-export commonly used types
pub use engine::{FixedJitter, Jitter, RandomJitter, SeededJitter};
pub use error::{AppError, EngineError};
pub use types::{Bar, Forecast, IndicatorBundle, ProjectionPoint, Series, SignalLabel};
