//! Signal classification, confidence, and narrative generation.

use crate::types::{IndicatorBundle, SignalLabel};

/// Confidence gained per unit of absolute prediction score.
const CONFIDENCE_SLOPE: f64 = 10.0;
/// Confidence ceiling for the strong tiers.
const STRONG_CEILING: f64 = 85.0;
/// Confidence ceiling for plain buy/sell.
const ACTION_CEILING: f64 = 75.0;
/// Confidence ceiling for hold.
const HOLD_CEILING: f64 = 60.0;

/// Map the composite prediction score to a discrete signal.
pub fn classify(prediction_score: f64) -> SignalLabel {
    if prediction_score > 1.5 {
        SignalLabel::StrongBuy
    } else if prediction_score > 0.5 {
        SignalLabel::Buy
    } else if prediction_score < -1.5 {
        SignalLabel::StrongSell
    } else if prediction_score < -0.5 {
        SignalLabel::Sell
    } else {
        SignalLabel::Hold
    }
}

/// Stated confidence percentage for a score and signal tier.
///
/// Base 50 plus ten points per score unit, clamped to the tier ceiling,
/// then scaled down when volatility is elevated: uncertainty must reduce
/// stated confidence monotonically.
pub fn confidence(prediction_score: f64, signal: SignalLabel, volatility_pct: f64) -> f64 {
    let ceiling = match signal {
        SignalLabel::StrongBuy | SignalLabel::StrongSell => STRONG_CEILING,
        SignalLabel::Buy | SignalLabel::Sell => ACTION_CEILING,
        SignalLabel::Hold => HOLD_CEILING,
    };
    let mut value = (50.0 + prediction_score.abs() * CONFIDENCE_SLOPE).min(ceiling);
    if volatility_pct > 5.0 {
        value *= 0.85;
    } else if volatility_pct > 3.0 {
        value *= 0.92;
    }
    value.clamp(0.0, 100.0)
}

/// Deterministic rationale lines for an indicator bundle.
///
/// The order is fixed: RSI, trend, momentum, volume, volatility, MACD.
pub fn narrative(bundle: &IndicatorBundle) -> Vec<String> {
    let mut lines = Vec::with_capacity(6);

    lines.push(if bundle.rsi < 30.0 {
        format!(
            "RSI at {:.1} indicates the stock is oversold and may be due for a rebound.",
            bundle.rsi
        )
    } else if bundle.rsi > 70.0 {
        format!(
            "RSI at {:.1} indicates the stock is overbought and may be due for a pullback.",
            bundle.rsi
        )
    } else {
        format!("RSI at {:.1} is in neutral territory.", bundle.rsi)
    });

    lines.push(if bundle.trend_score >= 3 {
        "Moving averages are aligned in a strong uptrend.".to_string()
    } else if bundle.trend_score >= 1 {
        "Moving averages lean mildly bullish.".to_string()
    } else if bundle.trend_score <= -3 {
        "Moving averages are aligned in a strong downtrend.".to_string()
    } else if bundle.trend_score <= -1 {
        "Moving averages lean mildly bearish.".to_string()
    } else {
        "Moving averages show no clear trend.".to_string()
    });

    lines.push(if bundle.momentum_pct > 5.0 {
        format!(
            "Price momentum of {:.1}% over ten days is strongly positive.",
            bundle.momentum_pct
        )
    } else if bundle.momentum_pct > 0.0 {
        format!(
            "Price momentum of {:.1}% over ten days is modestly positive.",
            bundle.momentum_pct
        )
    } else if bundle.momentum_pct < -5.0 {
        format!(
            "Price momentum of {:.1}% over ten days is strongly negative.",
            bundle.momentum_pct
        )
    } else if bundle.momentum_pct < 0.0 {
        format!(
            "Price momentum of {:.1}% over ten days is modestly negative.",
            bundle.momentum_pct
        )
    } else {
        "Price momentum over ten days is flat.".to_string()
    });

    lines.push(if bundle.volume_trend_pct > 25.0 {
        format!(
            "Trading volume is {:.0}% above its 20-day average, confirming interest.",
            bundle.volume_trend_pct
        )
    } else if bundle.volume_trend_pct < -25.0 {
        format!(
            "Trading volume is {:.0}% below its 20-day average, suggesting fading interest.",
            bundle.volume_trend_pct.abs()
        )
    } else {
        "Trading volume is near its 20-day average.".to_string()
    });

    lines.push(if bundle.volatility_pct > 5.0 {
        format!(
            "Daily volatility of {:.1}% is high; expect wide price swings.",
            bundle.volatility_pct
        )
    } else if bundle.volatility_pct > 3.0 {
        format!(
            "Daily volatility of {:.1}% is elevated.",
            bundle.volatility_pct
        )
    } else {
        format!(
            "Daily volatility of {:.1}% is moderate.",
            bundle.volatility_pct
        )
    });

    lines.push(if bundle.macd_histogram > 0.0 {
        "MACD histogram is positive, supporting bullish pressure.".to_string()
    } else if bundle.macd_histogram < 0.0 {
        "MACD histogram is negative, supporting bearish pressure.".to_string()
    } else {
        "MACD histogram is flat.".to_string()
    });

    lines
}
