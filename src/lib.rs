//! forecast-chart: data-to-geometry transform for weekly price-forecast charts.
//!
//! Observed prices and pattern predictions go in; slot/price scales, merged
//! per-pattern bars, extent and input markers, legend entries and a
//! backend-agnostic render frame come out.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartUpdate, ForecastChart, build_chart_update};
pub use error::{ChartError, ChartResult};
