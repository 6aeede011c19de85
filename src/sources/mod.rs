//! Market data providers.

pub mod alphavantage;
pub mod mock;

pub use alphavantage::AlphaVantageClient;
pub use mock::MockProvider;

use futures_util::future::BoxFuture;

use crate::error::EngineError;
use crate::types::Series;

/// Provider of ordered daily bars for a symbol.
///
/// Implementations own their retries and timeouts; failures surface as
/// [`EngineError::Provider`] and are never replaced with fabricated data.
/// A successful fetch may legitimately return an empty series, which the
/// engine rejects as insufficient history.
pub trait BarProvider: Send + Sync {
    /// Fetch up to `days` of ascending daily history for a symbol.
    fn fetch_history<'a>(
        &'a self,
        symbol: &'a str,
        days: usize,
    ) -> BoxFuture<'a, Result<Series, EngineError>>;
}
