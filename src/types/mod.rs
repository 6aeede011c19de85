//! Shared data types.

pub mod bar;
pub mod forecast;

pub use bar::{Bar, Series};
pub use forecast::{
    Forecast, IndicatorBundle, PredictionComponents, ProjectionPoint, SignalLabel,
};
