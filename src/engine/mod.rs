//! Analysis engine.
//!
//! Pure computation over a validated price series: indicator bundle,
//! composite score, discrete signal with confidence, narrative, and a
//! multi-day projection. Performs no I/O; each call is independent and
//! safe to run concurrently across symbols.

pub mod classify;
pub mod indicators;
pub mod projection;
pub mod score;

pub use projection::{FixedJitter, Jitter, RandomJitter, SeededJitter};

use tracing::debug;

use crate::error::EngineError;
use crate::types::{Forecast, PredictionComponents, Series};
use projection::round2;

/// Minimum bars required before any analysis runs. Shorter histories are
/// rejected up front instead of degrading to misleading indicator
/// defaults.
pub const MIN_HISTORY: usize = 20;

/// The analysis engine. Holds only the injected jitter source.
pub struct Engine {
    jitter: Box<dyn Jitter>,
}

impl Engine {
    /// Engine with the production random jitter source.
    pub fn new() -> Self {
        Self {
            jitter: Box::new(RandomJitter),
        }
    }

    /// Engine with an injected jitter source, for reproducible output.
    pub fn with_jitter(jitter: Box<dyn Jitter>) -> Self {
        Self { jitter }
    }

    /// Analyze a series and project `horizon` days forward.
    ///
    /// Fails fast with `InvalidInput` for a zero horizon and with
    /// `InsufficientHistory` when fewer than [`MIN_HISTORY`] bars exist
    /// (including the empty series a failed fetch produces). All emitted
    /// monetary and percentage values are rounded to two decimals here,
    /// at the boundary, never inside the numeric loops.
    pub fn analyze(
        &self,
        symbol: &str,
        series: &Series,
        horizon: u32,
    ) -> Result<Forecast, EngineError> {
        if horizon == 0 {
            return Err(EngineError::InvalidInput(
                "horizon must be at least 1 day".to_string(),
            ));
        }
        if series.len() < MIN_HISTORY {
            return Err(EngineError::InsufficientHistory {
                got: series.len(),
                need: MIN_HISTORY,
            });
        }

        let bundle = indicators::compute_bundle(series);
        let current_price = series
            .last()
            .map(|bar| bar.close)
            .ok_or(EngineError::InsufficientHistory {
                got: 0,
                need: MIN_HISTORY,
            })?;

        let components = score::score_bundle(&bundle, current_price);
        let prediction_score = components.prediction_score();
        let signal = classify::classify(prediction_score);
        let confidence = classify::confidence(prediction_score, signal, bundle.volatility_pct);
        let analysis = classify::narrative(&bundle);
        let predictions = projection::project(
            current_price,
            prediction_score,
            bundle.volatility_pct,
            bundle.momentum_pct,
            horizon,
            self.jitter.as_ref(),
        );

        debug!(
            symbol,
            prediction_score,
            signal = signal.label(),
            confidence,
            "analysis complete"
        );

        Ok(Forecast {
            symbol: symbol.to_uppercase(),
            current_price: round2(current_price),
            predictions,
            signal,
            confidence: round2(confidence),
            indicators: bundle.rounded(),
            analysis,
        })
    }

    /// Weighted score components for a series, without projecting.
    ///
    /// Same validation as [`Engine::analyze`]; useful to callers that only
    /// need the composite score.
    pub fn score_components(
        &self,
        series: &Series,
    ) -> Result<PredictionComponents, EngineError> {
        if series.len() < MIN_HISTORY {
            return Err(EngineError::InsufficientHistory {
                got: series.len(),
                need: MIN_HISTORY,
            });
        }
        let bundle = indicators::compute_bundle(series);
        let price = series.last().map(|bar| bar.close).unwrap_or(0.0);
        Ok(score::score_bundle(&bundle, price))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
