mod chart_config;
mod json_contract;
mod line_chart;
mod recompute;
mod render_frame_builder;
mod render_style;
mod scrub_controller;
mod validation;

pub use chart_config::{ChartConfig, ConfigChange};
pub use json_contract::{CHART_CONFIG_JSON_SCHEMA_V1, ChartConfigJsonContractV1};
pub use line_chart::LineChart;
pub use recompute::recompute;
pub use render_style::{ChartStyle, DIMMED_LABEL_ALPHA};
pub use scrub_controller::{ScrubCursor, ScrubListener};
