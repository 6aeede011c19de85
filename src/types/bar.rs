//! Daily bar and validated price series types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A single daily observation for a security.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Calendar day of the observation.
    pub date: NaiveDate,
    /// Closing price. Always positive.
    pub close: f64,
    /// Shares traded during the day.
    pub volume: u64,
}

impl Bar {
    pub fn new(date: NaiveDate, close: f64, volume: u64) -> Self {
        Self {
            date,
            close,
            volume,
        }
    }
}

/// An ordered, gap-tolerant sequence of daily bars sorted ascending by date.
///
/// Construction validates the ordering invariant once so every downstream
/// window operation can assume it. Calendar gaps (weekends, holidays) are
/// allowed; duplicate or out-of-order dates are not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series(Vec<Bar>);

impl Series {
    /// Build a series from bars already sorted ascending by date.
    ///
    /// Returns `InvalidInput` if dates are not strictly increasing or any
    /// close is non-positive.
    pub fn new(bars: Vec<Bar>) -> Result<Self, EngineError> {
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(EngineError::InvalidInput(format!(
                    "bar dates must be strictly increasing: {} followed by {}",
                    pair[0].date, pair[1].date
                )));
            }
        }
        if let Some(bad) = bars.iter().find(|b| b.close <= 0.0 || !b.close.is_finite()) {
            return Err(EngineError::InvalidInput(format!(
                "close must be a positive number, got {} on {}",
                bad.close, bad.date
            )));
        }
        Ok(Self(bars))
    }

    /// Build a series from unordered bars, sorting by date first.
    pub fn from_unsorted(mut bars: Vec<Bar>) -> Result<Self, EngineError> {
        bars.sort_by_key(|b| b.date);
        Self::new(bars)
    }

    /// An empty series, as a failed provider fetch produces.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.0
    }

    pub fn last(&self) -> Option<&Bar> {
        self.0.last()
    }

    /// Closing prices in chronological order.
    pub fn closes(&self) -> Vec<f64> {
        self.0.iter().map(|b| b.close).collect()
    }

    /// Daily volumes in chronological order.
    pub fn volumes(&self) -> Vec<u64> {
        self.0.iter().map(|b| b.volume).collect()
    }
}
