//! Multi-day price projection.
//!
//! Compounds a derived daily-change rate forward over the horizon with
//! progressive amplification and a bounded jitter term. The jitter is the
//! only stochastic element in the engine and always comes from an injected
//! [`Jitter`] source so test replays are reproducible.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::ProjectionPoint;

/// Half-width of the uniform jitter draw.
pub const JITTER_BOUND: f64 = 0.2;

/// Source of uniform draws in [-0.2, 0.2] for the projection loop.
pub trait Jitter: Send + Sync {
    /// Next uniform factor in [-0.2, 0.2].
    fn draw(&self) -> f64;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct RandomJitter;

impl Jitter for RandomJitter {
    fn draw(&self) -> f64 {
        rand::thread_rng().gen_range(-JITTER_BOUND..JITTER_BOUND)
    }
}

/// Deterministic source seeded once, for reproducible replays.
#[derive(Debug)]
pub struct SeededJitter(Mutex<StdRng>);

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl Jitter for SeededJitter {
    fn draw(&self) -> f64 {
        self.0
            .lock()
            .map(|mut rng| rng.gen_range(-JITTER_BOUND..JITTER_BOUND))
            .unwrap_or(0.0)
    }
}

/// Constant source, handy for tests that want the noise term pinned.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl Jitter for FixedJitter {
    fn draw(&self) -> f64 {
        self.0
    }
}

/// Project `horizon` days forward from the current price.
///
/// Damping policy: progressive amplification. The per-day rate is scaled
/// by `1 + (i/horizon) * 0.2` so later days drift slightly harder, and a
/// volatility-scaled jitter term is added each step. Accumulation runs at
/// full precision; emitted prices and percentages are rounded to two
/// decimal places at this boundary.
pub fn project(
    current_price: f64,
    prediction_score: f64,
    volatility_pct: f64,
    momentum_pct: f64,
    horizon: u32,
    jitter: &dyn Jitter,
) -> Vec<ProjectionPoint> {
    let base_change = prediction_score * (volatility_pct / 5.0);
    let daily_rate = (base_change + momentum_pct * 0.1) / horizon as f64;

    let mut points = Vec::with_capacity(horizon as usize);
    let mut cumulative = 0.0;
    for day in 1..=horizon {
        let day_factor = 1.0 + (day as f64 / horizon as f64) * 0.2;
        let random_factor = jitter.draw() * volatility_pct * 0.1;
        cumulative += daily_rate * day_factor + random_factor;
        let price = current_price * (1.0 + cumulative / 100.0);
        points.push(ProjectionPoint {
            day,
            price: round2(price),
            change_pct: round2(cumulative),
        });
    }
    points
}

/// Round to two decimal places for boundary emission.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
