//! Analysis output types: indicator snapshot, signal label, and forecast.

use serde::{Deserialize, Serialize};

/// Discrete directional signal derived from the composite prediction score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalLabel {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "STRONG SELL")]
    StrongSell,
}

impl SignalLabel {
    /// Display label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            SignalLabel::StrongBuy => "STRONG BUY",
            SignalLabel::Buy => "BUY",
            SignalLabel::Hold => "HOLD",
            SignalLabel::Sell => "SELL",
            SignalLabel::StrongSell => "STRONG SELL",
        }
    }

    /// Whether this is one of the strong-conviction tiers.
    pub fn is_strong(&self) -> bool {
        matches!(self, SignalLabel::StrongBuy | SignalLabel::StrongSell)
    }
}

/// Immutable indicator snapshot for a price series.
///
/// Moving averages and Bollinger bands are `None` when the history is
/// shorter than their window; the remaining fields fall back to the
/// documented per-indicator sentinels instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBundle {
    /// 10-day simple moving average.
    pub sma_short: Option<f64>,
    /// 20-day simple moving average.
    pub sma_medium: Option<f64>,
    /// 50-day simple moving average.
    pub sma_long: Option<f64>,
    /// 12-day exponential moving average.
    pub ema_short: Option<f64>,
    /// Relative Strength Index, bounded [0, 100].
    pub rsi: f64,
    /// 10-day momentum as a percentage.
    pub momentum_pct: f64,
    /// Sample stdev of daily returns over the trailing window, x100.
    /// Not annualized.
    pub volatility_pct: f64,
    pub macd_line: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub bollinger_upper: Option<f64>,
    pub bollinger_mid: Option<f64>,
    pub bollinger_lower: Option<f64>,
    /// Minimum close over the trailing window.
    pub support: f64,
    /// Maximum close over the trailing window.
    pub resistance: f64,
    /// Today's volume versus the 20-day average, as a percentage.
    pub volume_trend_pct: f64,
    /// Vote count across the defined SMA comparison pairs. The magnitude
    /// depends on how much history was available; callers must not assume
    /// a fixed range.
    pub trend_score: i32,
}

impl IndicatorBundle {
    /// Copy of the bundle with every real-valued field rounded to two
    /// decimal places, for emission at the API boundary.
    pub fn rounded(&self) -> Self {
        let r = |v: f64| (v * 100.0).round() / 100.0;
        Self {
            sma_short: self.sma_short.map(r),
            sma_medium: self.sma_medium.map(r),
            sma_long: self.sma_long.map(r),
            ema_short: self.ema_short.map(r),
            rsi: r(self.rsi),
            momentum_pct: r(self.momentum_pct),
            volatility_pct: r(self.volatility_pct),
            macd_line: r(self.macd_line),
            macd_signal: r(self.macd_signal),
            macd_histogram: r(self.macd_histogram),
            bollinger_upper: self.bollinger_upper.map(r),
            bollinger_mid: self.bollinger_mid.map(r),
            bollinger_lower: self.bollinger_lower.map(r),
            support: r(self.support),
            resistance: r(self.resistance),
            volume_trend_pct: r(self.volume_trend_pct),
            trend_score: self.trend_score,
        }
    }
}

/// Per-indicator weighted contributions to the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionComponents {
    pub rsi: f64,
    pub sma_cross: f64,
    pub momentum: f64,
    pub macd: f64,
    pub bollinger: f64,
}

impl PredictionComponents {
    /// Sum of all weighted contributions.
    pub fn prediction_score(&self) -> f64 {
        self.rsi + self.sma_cross + self.momentum + self.macd + self.bollinger
    }
}

/// A single projected day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Days ahead of the last observed bar, 1-based.
    pub day: u32,
    /// Projected closing price.
    pub price: f64,
    /// Cumulative change from the current price, as a percentage.
    pub change_pct: f64,
}

/// Complete analysis result for one symbol.
///
/// This is the wire contract: the HTTP layer serializes it unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub symbol: String,
    pub current_price: f64,
    /// Exactly `horizon` points with days 1..=horizon.
    pub predictions: Vec<ProjectionPoint>,
    pub signal: SignalLabel,
    /// Stated confidence percentage, bounded [0, 100].
    pub confidence: f64,
    pub indicators: IndicatorBundle,
    /// Fixed-order human-readable rationale lines.
    pub analysis: Vec<String>,
}
