mod chart_config;
mod forecast_chart;
mod frame_builder;
mod json_contract;
mod probability_formatter;

pub use chart_config::ChartConfig;
pub use forecast_chart::{ChartUpdate, ForecastChart, LegendItem, build_chart_update};
pub use frame_builder::build_render_frame;
pub use json_contract::{CHART_UPDATE_JSON_SCHEMA_V1, ChartUpdateJsonContractV1};
pub use probability_formatter::{PercentFormatter, ProbabilityFormatter};
