use serde::{Deserialize, Serialize};

use crate::core::{FillType, GeometryOptions, LabelLayout, ScaleEngineTuning};
use crate::interaction::{DEFAULT_TOUCH_SLOP_PX, LONG_PRESS_TIMEOUT_MS, ScrubGestureConfig};

use super::ChartStyle;

/// Public line chart configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub fill_type: FillType,
    #[serde(default)]
    pub grid_x_divisions: u32,
    #[serde(default)]
    pub grid_y_divisions: u32,
    #[serde(default = "default_true")]
    pub zero_line_enabled: bool,
    #[serde(default = "default_true")]
    pub scrub_enabled: bool,
    #[serde(default = "default_touch_slop_px")]
    pub touch_slop_px: f64,
    #[serde(default = "default_long_press_timeout_ms")]
    pub long_press_timeout_ms: u64,
    #[serde(default)]
    pub label_layout: LabelLayout,
    #[serde(default)]
    pub scale_tuning: ScaleEngineTuning,
    #[serde(default)]
    pub style: ChartStyle,
}

/// What a configuration change requires from the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigChange {
    Unchanged,
    /// Only paint attributes changed; geometry stays valid.
    Repaint,
    /// Geometry depends on a changed field and must be rebuilt.
    Recompute,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            fill_type: FillType::None,
            grid_x_divisions: 0,
            grid_y_divisions: 0,
            zero_line_enabled: default_true(),
            scrub_enabled: default_true(),
            touch_slop_px: default_touch_slop_px(),
            long_press_timeout_ms: default_long_press_timeout_ms(),
            label_layout: LabelLayout::default(),
            scale_tuning: ScaleEngineTuning::default(),
            style: ChartStyle::default(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_fill_type(mut self, fill_type: FillType) -> Self {
        self.fill_type = fill_type;
        self
    }

    /// Sets vertical (x) and horizontal (y) grid division counts.
    #[must_use]
    pub fn with_grid_divisions(mut self, x_divisions: u32, y_divisions: u32) -> Self {
        self.grid_x_divisions = x_divisions;
        self.grid_y_divisions = y_divisions;
        self
    }

    #[must_use]
    pub fn with_zero_line_enabled(mut self, enabled: bool) -> Self {
        self.zero_line_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_scrub_enabled(mut self, enabled: bool) -> Self {
        self.scrub_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_touch_slop_px(mut self, touch_slop_px: f64) -> Self {
        self.touch_slop_px = touch_slop_px;
        self
    }

    #[must_use]
    pub fn with_long_press_timeout_ms(mut self, long_press_timeout_ms: u64) -> Self {
        self.long_press_timeout_ms = long_press_timeout_ms;
        self
    }

    #[must_use]
    pub fn with_label_layout(mut self, label_layout: LabelLayout) -> Self {
        self.label_layout = label_layout;
        self
    }

    #[must_use]
    pub fn with_scale_tuning(mut self, scale_tuning: ScaleEngineTuning) -> Self {
        self.scale_tuning = scale_tuning;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn geometry_options(&self) -> GeometryOptions {
        GeometryOptions {
            fill_type: self.fill_type,
            grid_x_divisions: self.grid_x_divisions,
            grid_y_divisions: self.grid_y_divisions,
            zero_line_enabled: self.zero_line_enabled,
            label_layout: self.label_layout,
        }
    }

    #[must_use]
    pub fn gesture_config(&self) -> ScrubGestureConfig {
        ScrubGestureConfig {
            touch_slop_px: self.touch_slop_px,
            long_press_timeout_ms: self.long_press_timeout_ms,
        }
    }

    /// Classifies the switch from `self` to `next`.
    #[must_use]
    pub fn diff(&self, next: &Self) -> ConfigChange {
        if self == next {
            return ConfigChange::Unchanged;
        }
        if self.geometry_options() != next.geometry_options()
            || self.scale_tuning != next.scale_tuning
        {
            return ConfigChange::Recompute;
        }
        ConfigChange::Repaint
    }
}

fn default_true() -> bool {
    true
}

fn default_touch_slop_px() -> f64 {
    DEFAULT_TOUCH_SLOP_PX
}

fn default_long_press_timeout_ms() -> u64 {
    LONG_PRESS_TIMEOUT_MS
}
