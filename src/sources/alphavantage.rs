//! Alpha Vantage client for historical daily stock data.
//!
//! Fetches TIME_SERIES_DAILY and adapts it into a validated [`Series`].
//! Note: the free tier has very limited rate limits (25 requests/day).

use std::collections::HashMap;

use chrono::NaiveDate;
use futures_util::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::error::EngineError;
use crate::sources::BarProvider;
use crate::types::{Bar, Series};

const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";

/// Daily time series response. Only the fields the engine consumes are
/// declared; the rest of the payload is ignored.
#[derive(Debug, Deserialize)]
struct TimeSeriesDailyResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyDataPoint>>,
    /// Rate-limit notices arrive as a bare "Note" instead of data.
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyDataPoint {
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

/// Alpha Vantage API client.
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    async fn fetch_daily(&self, symbol: &str, days: usize) -> Result<Series, EngineError> {
        // The compact output covers the latest 100 trading days.
        let outputsize = if days > 100 { "full" } else { "compact" };
        let url = format!(
            "{}?function=TIME_SERIES_DAILY&symbol={}&outputsize={}&apikey={}",
            ALPHA_VANTAGE_URL, symbol, outputsize, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| EngineError::Provider(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(EngineError::Provider(format!(
                "alphavantage returned {}",
                response.status()
            )));
        }

        let data: TimeSeriesDailyResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Provider(format!("parse error: {e}")))?;

        if let Some(note) = data.note {
            return Err(EngineError::Provider(format!("rate limited: {note}")));
        }
        if let Some(message) = data.error_message {
            return Err(EngineError::Provider(message));
        }

        let Some(time_series) = data.time_series else {
            return Ok(Series::empty());
        };

        let mut bars = Vec::with_capacity(time_series.len());
        for (date_str, point) in &time_series {
            let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") else {
                warn!(symbol, date = %date_str, "skipping bar with unparseable date");
                continue;
            };
            let Ok(close) = point.close.parse::<f64>() else {
                warn!(symbol, date = %date_str, "skipping bar with unparseable close");
                continue;
            };
            let volume = point.volume.parse::<u64>().unwrap_or(0);
            bars.push(Bar::new(date, close, volume));
        }

        bars.sort_by_key(|b| b.date);
        if bars.len() > days {
            bars.drain(..bars.len() - days);
        }

        Series::new(bars)
            .map_err(|e| EngineError::Provider(format!("malformed upstream data: {e}")))
    }
}

impl BarProvider for AlphaVantageClient {
    fn fetch_history<'a>(
        &'a self,
        symbol: &'a str,
        days: usize,
    ) -> BoxFuture<'a, Result<Series, EngineError>> {
        Box::pin(self.fetch_daily(symbol, days))
    }
}
