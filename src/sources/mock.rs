//! Deterministic mock bar provider.
//!
//! Generates a seeded random walk per symbol so the server is fully
//! usable without an upstream API key. The seed derives from the symbol
//! bytes, so the same symbol always yields the same walk within a day.

use chrono::{Days, NaiveDate, Utc};
use futures_util::future::BoxFuture;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::EngineError;
use crate::sources::BarProvider;
use crate::types::{Bar, Series};

/// Mock provider generating plausible daily bars.
#[derive(Debug, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    /// Deterministic seed from the symbol bytes.
    fn seed_for(symbol: &str) -> u64 {
        symbol
            .to_uppercase()
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325, |acc: u64, b| {
                (acc ^ b as u64).wrapping_mul(0x0100_0000_01b3)
            })
    }

    fn generate(&self, symbol: &str, today: NaiveDate, days: usize) -> Series {
        let days = days.max(1);
        let mut rng = StdRng::seed_from_u64(Self::seed_for(symbol));
        let mut price = rng.gen_range(50.0..500.0);
        let mut bars = Vec::with_capacity(days);
        for offset in (0..days).rev() {
            let date = today - Days::new(offset as u64);
            price += (rng.gen::<f64>() - 0.5) * 5.0;
            price = price.max(1.0);
            let volume = rng.gen_range(1_000_000..10_000_000);
            bars.push(Bar::new(date, price, volume));
        }
        // Dates are consecutive and the walk floor keeps closes positive,
        // so construction cannot fail.
        Series::new(bars).unwrap_or_else(|_| Series::empty())
    }
}

impl BarProvider for MockProvider {
    fn fetch_history<'a>(
        &'a self,
        symbol: &'a str,
        days: usize,
    ) -> BoxFuture<'a, Result<Series, EngineError>> {
        Box::pin(async move { Ok(self.generate(symbol, Utc::now().date_naive(), days)) })
    }
}
