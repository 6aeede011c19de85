//! Composite signal scorer.
//!
//! Combines the indicator bundle into a single weighted prediction score.
//! Each indicator contributes a signed, bounded term so that no single
//! input can dominate the composite; the weights are fixed and sum to 1.

use crate::types::{IndicatorBundle, PredictionComponents};

/// Indicator weights. Must sum to 1.0.
pub const WEIGHT_RSI: f64 = 0.30;
pub const WEIGHT_SMA_CROSS: f64 = 0.25;
pub const WEIGHT_MOMENTUM: f64 = 0.20;
pub const WEIGHT_MACD: f64 = 0.15;
pub const WEIGHT_BOLLINGER: f64 = 0.10;

/// Raw RSI vote: oversold buys, overbought sells, graded by band.
fn rsi_vote(rsi: f64) -> f64 {
    if rsi < 30.0 {
        3.0
    } else if rsi < 40.0 {
        1.5
    } else if rsi > 70.0 {
        -3.0
    } else if rsi > 60.0 {
        -1.5
    } else {
        0.0
    }
}

/// Raw crossover vote: tanh-squashed spread between the short and medium
/// SMAs, so outsized gaps saturate at +-3. Zero when either is undefined.
fn sma_cross_vote(sma_short: Option<f64>, sma_medium: Option<f64>) -> f64 {
    match (sma_short, sma_medium) {
        (Some(short), Some(medium)) if medium != 0.0 => {
            let spread_pct = (short - medium) / medium * 100.0;
            (spread_pct / 2.0).tanh() * 3.0
        }
        _ => 0.0,
    }
}

/// Raw momentum vote, tanh-squashed to +-3.
fn momentum_vote(momentum_pct: f64) -> f64 {
    (momentum_pct / 10.0).tanh() * 3.0
}

/// Raw MACD vote: histogram sign with magnitude capped at 2.
fn macd_vote(histogram: f64) -> f64 {
    histogram.signum() * (histogram.abs() * 10.0).min(2.0)
}

/// Raw Bollinger vote from the price's position inside the bands:
/// near the lower band is oversold, near the upper band overbought.
/// Zero when the bands are undefined or degenerate.
fn bollinger_vote(price: f64, upper: Option<f64>, lower: Option<f64>) -> f64 {
    match (upper, lower) {
        (Some(upper), Some(lower)) if upper > lower => {
            let position = (price - lower) / (upper - lower);
            if position < 0.2 {
                2.0
            } else if position > 0.8 {
                -2.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Weighted per-indicator contributions for a bundle and current price.
pub fn score_bundle(bundle: &IndicatorBundle, price: f64) -> PredictionComponents {
    PredictionComponents {
        rsi: rsi_vote(bundle.rsi) * WEIGHT_RSI,
        sma_cross: sma_cross_vote(bundle.sma_short, bundle.sma_medium) * WEIGHT_SMA_CROSS,
        momentum: momentum_vote(bundle.momentum_pct) * WEIGHT_MOMENTUM,
        macd: macd_vote(bundle.macd_histogram) * WEIGHT_MACD,
        bollinger: bollinger_vote(price, bundle.bollinger_upper, bundle.bollinger_lower)
            * WEIGHT_BOLLINGER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral_bundle() -> IndicatorBundle {
        IndicatorBundle {
            sma_short: Some(100.0),
            sma_medium: Some(100.0),
            sma_long: Some(100.0),
            ema_short: Some(100.0),
            rsi: 50.0,
            momentum_pct: 0.0,
            volatility_pct: 1.0,
            macd_line: 0.0,
            macd_signal: 0.0,
            macd_histogram: 0.0,
            bollinger_upper: Some(102.0),
            bollinger_mid: Some(100.0),
            bollinger_lower: Some(98.0),
            support: 98.0,
            resistance: 102.0,
            volume_trend_pct: 0.0,
            trend_score: 0,
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let sum = WEIGHT_RSI + WEIGHT_SMA_CROSS + WEIGHT_MOMENTUM + WEIGHT_MACD + WEIGHT_BOLLINGER;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_neutral_bundle_scores_zero() {
        let components = score_bundle(&neutral_bundle(), 100.0);
        assert_eq!(components.prediction_score(), 0.0);
    }

    #[test]
    fn test_rsi_bands() {
        assert_eq!(rsi_vote(25.0), 3.0);
        assert_eq!(rsi_vote(35.0), 1.5);
        assert_eq!(rsi_vote(50.0), 0.0);
        assert_eq!(rsi_vote(65.0), -1.5);
        assert_eq!(rsi_vote(80.0), -3.0);
    }

    #[test]
    fn test_oversold_rsi_contribution_is_weighted() {
        let mut bundle = neutral_bundle();
        bundle.rsi = 20.0;
        let components = score_bundle(&bundle, 100.0);
        assert!((components.rsi - 3.0 * WEIGHT_RSI).abs() < 1e-12);
    }

    #[test]
    fn test_sma_cross_saturates() {
        // A huge spread saturates near the +-3 bound instead of growing.
        let extreme = sma_cross_vote(Some(200.0), Some(100.0));
        assert!(extreme > 2.99 && extreme <= 3.0);
        let inverse = sma_cross_vote(Some(100.0), Some(200.0));
        assert!(inverse < -2.99 && inverse >= -3.0);
    }

    #[test]
    fn test_sma_cross_undefined_operand_is_zero() {
        assert_eq!(sma_cross_vote(None, Some(100.0)), 0.0);
        assert_eq!(sma_cross_vote(Some(100.0), None), 0.0);
    }

    #[test]
    fn test_momentum_squashed() {
        assert!(momentum_vote(100.0) <= 3.0);
        assert!(momentum_vote(-100.0) >= -3.0);
        assert!(momentum_vote(5.0) > 0.0);
        assert_eq!(momentum_vote(0.0), 0.0);
    }

    #[test]
    fn test_macd_vote_capped_at_two() {
        assert_eq!(macd_vote(1.0), 2.0);
        assert_eq!(macd_vote(-1.0), -2.0);
        assert!((macd_vote(0.05) - 0.5).abs() < 1e-12);
        assert_eq!(macd_vote(0.0), 0.0);
    }

    #[test]
    fn test_bollinger_positions() {
        let upper = Some(110.0);
        let lower = Some(90.0);
        assert_eq!(bollinger_vote(91.0, upper, lower), 2.0);
        assert_eq!(bollinger_vote(109.0, upper, lower), -2.0);
        assert_eq!(bollinger_vote(100.0, upper, lower), 0.0);
        // Degenerate band width contributes nothing.
        assert_eq!(bollinger_vote(100.0, Some(100.0), Some(100.0)), 0.0);
        assert_eq!(bollinger_vote(100.0, None, None), 0.0);
    }

    #[test]
    fn test_score_stays_in_practical_range() {
        let mut bundle = neutral_bundle();
        bundle.rsi = 10.0;
        bundle.sma_short = Some(150.0);
        bundle.sma_medium = Some(100.0);
        bundle.momentum_pct = 50.0;
        bundle.macd_histogram = 5.0;
        let components = score_bundle(&bundle, 90.5);
        let score = components.prediction_score();
        assert!(score > 0.0 && score <= 3.0);
    }
}
