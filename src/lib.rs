//! linechart-rs: headless sparkline-style line chart engine.
//!
//! The crate turns an ordered data series and a drawing area into
//! deterministic geometry (polyline, fill, grid, reference lines and y-axis
//! labels) and detects press-and-hold scrub gestures over it. Pixels are
//! produced by a pluggable [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartStyle, ConfigChange, LineChart, ScrubCursor, ScrubListener};
pub use error::{ChartError, ChartResult};
