use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Label alpha factor applied while the user scrubs.
pub const DIMMED_LABEL_ALPHA: f64 = 0.3;

/// Colors and stroke widths of a line chart.
///
/// Style never affects geometry; changing it only requires a repaint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub line_color: Color,
    pub line_width: f64,
    /// Rounds the polyline joins; `0` keeps sharp corners.
    pub line_corner_radius: f64,
    pub fill_color: Color,
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    pub baseline_color: Color,
    pub baseline_width: f64,
    pub zero_line_color: Color,
    pub zero_line_width: f64,
    pub scrub_line_color: Color,
    pub scrub_line_width: f64,
    pub scrub_cursor_color: Color,
    pub scrub_cursor_radius: f64,
    pub label_text_color: Color,
    pub label_background_color: Color,
    pub label_background_radius: f64,
    pub zero_label_text_color: Color,
    pub zero_label_background_color: Color,
    pub dimmed_label_alpha: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_color: Color::rgb(0.0, 0.6, 0.4),
            line_width: 2.0,
            line_corner_radius: 0.0,
            fill_color: Color::rgba(0.0, 0.6, 0.4, 0.2),
            grid_line_color: Color::rgba(0.0, 0.0, 0.0, 0.12),
            grid_line_width: 1.0,
            baseline_color: Color::rgb(0.55, 0.55, 0.55),
            baseline_width: 1.0,
            zero_line_color: Color::rgb(0.75, 0.2, 0.2),
            zero_line_width: 1.0,
            scrub_line_color: Color::rgb(0.3, 0.3, 0.3),
            scrub_line_width: 2.0,
            scrub_cursor_color: Color::rgb(0.0, 0.6, 0.4),
            scrub_cursor_radius: 6.0,
            label_text_color: Color::rgb(0.25, 0.25, 0.25),
            label_background_color: Color::rgba(1.0, 1.0, 1.0, 0.85),
            label_background_radius: 4.0,
            zero_label_text_color: Color::rgb(1.0, 1.0, 1.0),
            zero_label_background_color: Color::rgb(0.75, 0.2, 0.2),
            dimmed_label_alpha: DIMMED_LABEL_ALPHA,
        }
    }
}

impl ChartStyle {
    #[must_use]
    pub fn with_line(mut self, color: Color, width: f64) -> Self {
        self.line_color = color;
        self.line_width = width;
        self
    }

    #[must_use]
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    #[must_use]
    pub fn with_grid_line(mut self, color: Color, width: f64) -> Self {
        self.grid_line_color = color;
        self.grid_line_width = width;
        self
    }

    #[must_use]
    pub fn with_scrub_line(mut self, color: Color, width: f64) -> Self {
        self.scrub_line_color = color;
        self.scrub_line_width = width;
        self
    }
}
