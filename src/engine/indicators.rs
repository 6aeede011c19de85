//! Technical indicator library.
//!
//! Stateless window functions over closing prices and volumes. Every
//! function tolerates short input by returning a documented sentinel
//! (`None` or a neutral value) instead of panicking; the hard minimum-
//! history check lives in [`crate::engine::Engine::analyze`].

use crate::types::{IndicatorBundle, Series};

/// RSI lookback in deltas.
pub const RSI_PERIOD: usize = 14;
/// Short simple moving average window.
pub const SMA_SHORT: usize = 10;
/// Medium simple moving average window.
pub const SMA_MEDIUM: usize = 20;
/// Long simple moving average window.
pub const SMA_LONG: usize = 50;
/// Short exponential moving average window.
pub const EMA_SHORT: usize = 12;
/// MACD fast EMA window.
pub const MACD_FAST: usize = 12;
/// MACD slow EMA window.
pub const MACD_SLOW: usize = 26;
/// MACD signal-line EMA window.
pub const MACD_SIGNAL: usize = 9;
/// Bollinger band window.
pub const BOLLINGER_PERIOD: usize = 20;
/// Volatility lookback in returns.
pub const VOLATILITY_PERIOD: usize = 20;
/// Momentum lookback in bars.
pub const MOMENTUM_PERIOD: usize = 10;
/// Support/resistance window.
pub const RANGE_WINDOW: usize = 20;
/// Volume-trend averaging window.
pub const VOLUME_WINDOW: usize = 20;

/// Simple moving average of the trailing `period` values.
///
/// `None` when fewer than `period` values exist.
pub fn sma(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }
    let window = &prices[prices.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Exponential moving average over the whole slice.
///
/// The seed is the SMA of the *earliest* `period` points; the recurrence
/// `ema = price*k + ema*(1-k)` with `k = 2/(period+1)` is then applied
/// left-to-right over the remaining values. `None` when fewer than
/// `period` values exist.
pub fn ema(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }
    let k = 2.0 / (period as f64 + 1.0);
    let mut value = prices[..period].iter().sum::<f64>() / period as f64;
    for price in &prices[period..] {
        value = price * k + value * (1.0 - k);
    }
    Some(value)
}

/// Relative Strength Index over the trailing `period` deltas.
///
/// Plain averages of positive and absolute negative deltas (no Wilder
/// smoothing). Exactly 100 when the average loss is zero; the neutral
/// sentinel 50 when fewer than `period + 1` prices exist.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return 50.0;
    }
    let window = &prices[prices.len() - period - 1..];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in window.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gain_sum += delta;
        } else {
            loss_sum += -delta;
        }
    }
    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// MACD line, signal line, and histogram.
///
/// The line is EMA(12) - EMA(26) over the full slice. The signal line is
/// the EMA(9) of the MACD-line values recomputed at every prefix from the
/// 26th price onward: each historical value derives from EMA12/EMA26 over
/// the prefix ending that day, not from an incremental EMA of the line.
/// O(n^2) and exact. When fewer than nine line values exist the signal
/// falls back to their plain mean; all three are 0.0 below 26 prices.
pub fn macd(prices: &[f64]) -> (f64, f64, f64) {
    if prices.len() < MACD_SLOW {
        return (0.0, 0.0, 0.0);
    }
    let mut line_series = Vec::with_capacity(prices.len() - MACD_SLOW + 1);
    for end in MACD_SLOW..=prices.len() {
        let prefix = &prices[..end];
        if let (Some(fast), Some(slow)) = (ema(prefix, MACD_FAST), ema(prefix, MACD_SLOW)) {
            line_series.push(fast - slow);
        }
    }
    let line = match line_series.last() {
        Some(v) => *v,
        None => return (0.0, 0.0, 0.0),
    };
    let signal = ema(&line_series, MACD_SIGNAL)
        .unwrap_or_else(|| line_series.iter().sum::<f64>() / line_series.len() as f64);
    (line, signal, line - signal)
}

/// Bollinger bands: (upper, mid, lower) with mid = SMA(period) and band
/// width two sample standard deviations of the trailing closes.
///
/// `None` when fewer than `period` values exist.
pub fn bollinger(prices: &[f64], period: usize) -> Option<(f64, f64, f64)> {
    let mid = sma(prices, period)?;
    let window = &prices[prices.len() - period..];
    let dev = sample_stdev(window);
    Some((mid + 2.0 * dev, mid, mid - 2.0 * dev))
}

/// Sample standard deviation of daily percentage returns over the
/// trailing window, expressed as a percentage. Not annualized.
///
/// 0.0 when fewer than two returns are available.
pub fn volatility(prices: &[f64], period: usize) -> f64 {
    let start = prices.len().saturating_sub(period + 1);
    let returns = pct_returns(&prices[start..]);
    sample_stdev(&returns)
}

/// Percentage change from `period` bars back to the latest close.
///
/// 0.0 when fewer than `period` prices exist.
pub fn momentum(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period {
        return 0.0;
    }
    let base = prices[prices.len() - period];
    let last = prices[prices.len() - 1];
    if base == 0.0 {
        return 0.0;
    }
    (last - base) / base * 100.0
}

/// Minimum and maximum close over the trailing window.
pub fn support_resistance(prices: &[f64], window: usize) -> Option<(f64, f64)> {
    if prices.is_empty() || window == 0 {
        return None;
    }
    let start = prices.len().saturating_sub(window);
    let slice = &prices[start..];
    let support = slice.iter().cloned().fold(f64::INFINITY, f64::min);
    let resistance = slice.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Some((support, resistance))
}

/// Today's volume versus the trailing-window average, as a percentage.
///
/// 0.0 when the series is empty or the average volume is zero.
pub fn volume_trend(volumes: &[u64], window: usize) -> f64 {
    let Some(&today) = volumes.last() else {
        return 0.0;
    };
    let start = volumes.len().saturating_sub(window);
    let slice = &volumes[start..];
    let avg = slice.iter().sum::<u64>() as f64 / slice.len() as f64;
    if avg == 0.0 {
        return 0.0;
    }
    (today as f64 - avg) / avg * 100.0
}

/// Vote count across the SMA comparison pairs.
///
/// Each *defined* pair contributes +1 if true, -1 if false; pairs with a
/// missing operand are skipped, so the score's magnitude shrinks with the
/// available history.
pub fn trend_score(
    price: f64,
    sma_short: Option<f64>,
    sma_medium: Option<f64>,
    sma_long: Option<f64>,
) -> i32 {
    let pairs = [
        sma_short.map(|s| price > s),
        sma_medium.map(|m| price > m),
        sma_long.map(|l| price > l),
        sma_short.and_then(|s| sma_medium.map(|m| s > m)),
        sma_medium.and_then(|m| sma_long.map(|l| m > l)),
    ];
    pairs
        .iter()
        .flatten()
        .map(|&up| if up { 1 } else { -1 })
        .sum()
}

/// Daily percentage returns between consecutive values.
pub fn pct_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter(|pair| pair[0] != 0.0)
        .map(|pair| (pair[1] - pair[0]) / pair[0] * 100.0)
        .collect()
}

/// Bessel-corrected (n-1) standard deviation. 0.0 below two values.
pub fn sample_stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Compute the full indicator snapshot for a series.
///
/// Callers are expected to have applied the minimum-history check; the
/// individual indicators still degrade to their sentinels if not.
pub fn compute_bundle(series: &Series) -> IndicatorBundle {
    let closes = series.closes();
    let volumes = series.volumes();
    let price = closes.last().copied().unwrap_or(0.0);

    let sma_short = sma(&closes, SMA_SHORT);
    let sma_medium = sma(&closes, SMA_MEDIUM);
    let sma_long = sma(&closes, SMA_LONG);
    let (macd_line, macd_signal, macd_histogram) = macd(&closes);
    let bands = bollinger(&closes, BOLLINGER_PERIOD);
    let (support, resistance) =
        support_resistance(&closes, RANGE_WINDOW).unwrap_or((price, price));

    IndicatorBundle {
        sma_short,
        sma_medium,
        sma_long,
        ema_short: ema(&closes, EMA_SHORT),
        rsi: rsi(&closes, RSI_PERIOD),
        momentum_pct: momentum(&closes, MOMENTUM_PERIOD),
        volatility_pct: volatility(&closes, VOLATILITY_PERIOD),
        macd_line,
        macd_signal,
        macd_histogram,
        bollinger_upper: bands.map(|(u, _, _)| u),
        bollinger_mid: bands.map(|(_, m, _)| m),
        bollinger_lower: bands.map(|(_, _, l)| l),
        support,
        resistance,
        volume_trend_pct: volume_trend(&volumes, VOLUME_WINDOW),
        trend_score: trend_score(price, sma_short, sma_medium, sma_long),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;
    use chrono::NaiveDate;

    fn series_from(closes: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar::new(start + chrono::Days::new(i as u64), close, 1_000_000))
            .collect();
        Series::new(bars).unwrap()
    }

    #[test]
    fn test_sma_basic() {
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(sma(&prices, 3), Some(4.0));
        assert_eq!(sma(&prices, 5), Some(3.0));
    }

    #[test]
    fn test_sma_short_input_is_none() {
        let prices = [1.0, 2.0];
        assert_eq!(sma(&prices, 3), None);
        assert_eq!(sma(&[], 1), None);
    }

    #[test]
    fn test_ema_seed_is_earliest_window() {
        // Seed = SMA of first 3 = 2.0, then fold 4 and 5 with k = 0.5.
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
        let value = ema(&prices, 3).unwrap();
        let expected = {
            let k = 0.5;
            let seed = 2.0;
            let step1 = 4.0 * k + seed * (1.0 - k);
            5.0 * k + step1 * (1.0 - k)
        };
        assert!((value - expected).abs() < 1e-12);
    }

    #[test]
    fn test_ema_equals_seed_at_exact_period() {
        let prices = [2.0, 4.0, 6.0];
        assert_eq!(ema(&prices, 3), Some(4.0));
    }

    #[test]
    fn test_ema_short_input_is_none() {
        assert_eq!(ema(&[1.0, 2.0], 3), None);
    }

    #[test]
    fn test_rsi_neutral_sentinel_on_short_input() {
        let prices = vec![100.0; 10];
        assert_eq!(rsi(&prices, 14), 50.0);
    }

    #[test]
    fn test_rsi_all_gains_is_exactly_100() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi(&prices, 14), 100.0);
    }

    #[test]
    fn test_rsi_last_day_jump_spikes_toward_100() {
        // Nineteen flat closes and a jump: every recent delta is either
        // zero or positive, so the average loss is zero.
        let mut prices = vec![100.0; 19];
        prices.push(130.0);
        assert_eq!(rsi(&prices, 14), 100.0);
    }

    #[test]
    fn test_rsi_bounded() {
        let prices: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 10.0)
            .collect();
        let value = rsi(&prices, 14);
        assert!((0.0..=100.0).contains(&value));

        let falling: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let value = rsi(&falling, 14);
        assert!(value >= 0.0 && value < 50.0);
    }

    #[test]
    fn test_macd_zero_below_26_prices() {
        let prices = vec![100.0; 25];
        assert_eq!(macd(&prices), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_macd_flat_series_is_zero() {
        let prices = vec![100.0; 60];
        let (line, signal, histogram) = macd(&prices);
        assert!(line.abs() < 1e-9);
        assert!(signal.abs() < 1e-9);
        assert!(histogram.abs() < 1e-9);
    }

    #[test]
    fn test_macd_uptrend_positive_line() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let (line, _, _) = macd(&prices);
        assert!(line > 0.0, "rising series should have positive MACD line");
    }

    #[test]
    fn test_macd_signal_matches_prefix_recurrence() {
        // Recompute the signal by hand from per-prefix MACD values.
        let prices: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.3).cos() * 5.0 + i as f64 * 0.2)
            .collect();
        let (line, signal, histogram) = macd(&prices);

        let mut expected_lines = Vec::new();
        for end in MACD_SLOW..=prices.len() {
            let fast = ema(&prices[..end], MACD_FAST).unwrap();
            let slow = ema(&prices[..end], MACD_SLOW).unwrap();
            expected_lines.push(fast - slow);
        }
        let expected_signal = ema(&expected_lines, MACD_SIGNAL).unwrap();
        assert!((line - *expected_lines.last().unwrap()).abs() < 1e-12);
        assert!((signal - expected_signal).abs() < 1e-12);
        assert!((histogram - (line - signal)).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_none_below_period() {
        let prices = vec![100.0; 19];
        assert_eq!(bollinger(&prices, 20), None);
    }

    #[test]
    fn test_bollinger_flat_series_has_zero_width() {
        let prices = vec![100.0; 25];
        let (upper, mid, lower) = bollinger(&prices, 20).unwrap();
        assert_eq!(upper, 100.0);
        assert_eq!(mid, 100.0);
        assert_eq!(lower, 100.0);
    }

    #[test]
    fn test_bollinger_bessel_correction() {
        // Window [99, 101] repeated: sample stdev uses n-1.
        let prices: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 99.0 } else { 101.0 }).collect();
        let (upper, mid, lower) = bollinger(&prices, 20).unwrap();
        let dev = sample_stdev(&prices);
        assert!((mid - 100.0).abs() < 1e-12);
        assert!((upper - (100.0 + 2.0 * dev)).abs() < 1e-12);
        assert!((lower - (100.0 - 2.0 * dev)).abs() < 1e-12);
    }

    #[test]
    fn test_volatility_zero_for_constant_series() {
        let prices = vec![42.0; 30];
        assert_eq!(volatility(&prices, 20), 0.0);
    }

    #[test]
    fn test_volatility_zero_for_constant_ratio_growth() {
        // Identical daily percentage change means zero return stdev.
        let mut prices = vec![100.0];
        for _ in 0..30 {
            let next = prices.last().unwrap() * 1.01;
            prices.push(next);
        }
        assert!(volatility(&prices, 20) < 1e-9);
    }

    #[test]
    fn test_volatility_positive_for_choppy_series() {
        let prices: Vec<f64> = (0..30)
            .map(|i| if i % 2 == 0 { 100.0 } else { 105.0 })
            .collect();
        assert!(volatility(&prices, 20) > 0.0);
    }

    #[test]
    fn test_momentum() {
        let mut prices = vec![100.0; 15];
        prices.extend([100.0, 102.0, 104.0, 106.0, 108.0, 110.0, 112.0, 114.0, 116.0, 110.0]);
        // Ten bars back is 100.0, last is 110.0.
        assert!((momentum(&prices, 10) - 10.0).abs() < 1e-12);
        assert_eq!(momentum(&prices[..5], 10), 0.0);
    }

    #[test]
    fn test_support_resistance() {
        let prices = [105.0, 99.0, 110.0, 101.0];
        assert_eq!(support_resistance(&prices, 20), Some((99.0, 110.0)));
        assert_eq!(support_resistance(&[], 20), None);
    }

    #[test]
    fn test_volume_trend() {
        let mut volumes = vec![1_000u64; 19];
        volumes.push(2_000);
        // Average is 1050, today is 2000.
        let trend = volume_trend(&volumes, 20);
        assert!((trend - (2_000.0 - 1_050.0) / 1_050.0 * 100.0).abs() < 1e-9);
        assert_eq!(volume_trend(&[], 20), 0.0);
        assert_eq!(volume_trend(&[0, 0, 0], 20), 0.0);
    }

    #[test]
    fn test_trend_score_all_defined() {
        // Price above everything, short > medium > long: all five votes up.
        assert_eq!(
            trend_score(110.0, Some(105.0), Some(100.0), Some(95.0)),
            5
        );
        // Price below everything, averages inverted: all five votes down.
        assert_eq!(
            trend_score(90.0, Some(95.0), Some(100.0), Some(105.0)),
            -5
        );
    }

    #[test]
    fn test_trend_score_skips_missing_operands() {
        // No long SMA: the price>long and medium>long pairs are skipped.
        assert_eq!(trend_score(110.0, Some(105.0), Some(100.0), None), 3);
        // Only the short SMA: a single defined pair.
        assert_eq!(trend_score(110.0, Some(105.0), None, None), 1);
        assert_eq!(trend_score(110.0, None, None, None), 0);
    }

    #[test]
    fn test_compute_bundle_short_history_sentinels() {
        // 25 bars: SMA-50 undefined, everything else defined.
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64 * 0.5).collect();
        let bundle = compute_bundle(&series_from(&closes));
        assert!(bundle.sma_short.is_some());
        assert!(bundle.sma_medium.is_some());
        assert!(bundle.sma_long.is_none());
        assert!(bundle.bollinger_mid.is_some());
        assert!((0.0..=100.0).contains(&bundle.rsi));
    }

    #[test]
    fn test_compute_bundle_rising_series_is_bullish() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let bundle = compute_bundle(&series_from(&closes));
        assert_eq!(bundle.rsi, 100.0);
        assert!(bundle.trend_score >= 4);
        assert!(bundle.momentum_pct > 0.0);
        assert!(bundle.macd_line > 0.0);
        assert_eq!(bundle.resistance, 159.0);
        assert_eq!(bundle.support, 140.0);
    }
}
