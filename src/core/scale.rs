use serde::{Deserialize, Serialize};

use crate::core::primitives::{lcm, round_to_multiple};
use crate::core::types::{DataBounds, DrawingArea};
use crate::error::{ChartError, ChartResult};

/// Default proportion of the data height added above and below the data.
pub const DEFAULT_EXPANSION_RATIO: f64 = 0.05;

/// Tuning controls for y-axis auto-ranging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleEngineTuning {
    pub expansion_ratio: f64,
}

impl Default for ScaleEngineTuning {
    fn default() -> Self {
        Self {
            expansion_ratio: DEFAULT_EXPANSION_RATIO,
        }
    }
}

impl ScaleEngineTuning {
    fn validate(self) -> ChartResult<Self> {
        if !self.expansion_ratio.is_finite() || self.expansion_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "scale expansion ratio must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Rounded y-axis bounds evenly divisible into grid bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NiceRange {
    pub min: f64,
    pub max: f64,
    /// Rounding step the bounds were aligned to (0.5, 1 or 5).
    pub granularity: f64,
}

impl NiceRange {
    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Chooses the rounding step from the width of the expanded interval.
#[must_use]
pub fn granularity_for(interval: f64) -> f64 {
    if interval >= 5.0 {
        5.0
    } else if interval >= 2.5 {
        1.0
    } else {
        0.5
    }
}

/// Expands `[min_y, max_y]` to human-friendly bounds that split into
/// `y_divisions` equal bands and always contain the data.
///
/// Callers must pass `y_divisions >= 1`.
#[must_use]
pub fn nice_range(min_y: f64, max_y: f64, y_divisions: u32, expansion_ratio: f64) -> NiceRange {
    let divisions = f64::from(y_divisions);
    let half_divisions = divisions / 2.0;

    let (min_expanded, max_expanded) = if max_y == min_y {
        // Horizontal line: open up a band around it without crossing zero.
        if min_y == 0.0 {
            (0.0, divisions)
        } else if min_y > 0.0 {
            ((min_y - half_divisions).max(0.0), max_y + half_divisions)
        } else {
            (min_y - half_divisions, (max_y + half_divisions).min(0.0))
        }
    } else {
        let expansion = (max_y - min_y) * expansion_ratio;
        let min_expanded = if min_y == 0.0 { 0.0 } else { min_y - expansion };
        let max_expanded = if max_y == 0.0 { 0.0 } else { max_y + expansion };
        (min_expanded, max_expanded)
    };

    let granularity = granularity_for((max_expanded - min_expanded).abs());
    let min_rounded = round_to_multiple(min_expanded, granularity, false);
    let max_rounded = round_to_multiple(max_expanded, granularity, true);
    let rounded_interval = (max_rounded - min_rounded).abs();

    // Smallest interval containing the data that splits into whole bands.
    let divisible_interval = lcm(rounded_interval, granularity);
    let step = divisible_interval / divisions;
    let divisible_rounded_interval = if rounded_interval > 10.0 {
        round_to_multiple(step, granularity, true) * divisions
    } else {
        // Small magnitudes keep finer bands than the granularity.
        step * divisions
    };

    let increment = (divisible_rounded_interval - rounded_interval).abs();
    let (expand_min, expand_max) = if increment > granularity && min_rounded != 0.0 {
        (increment / 2.0, increment / 2.0)
    } else {
        (0.0, increment)
    };

    NiceRange {
        min: min_rounded - expand_min,
        max: max_rounded + expand_max,
        granularity,
    }
}

/// Computes axis mappings from data bounds and a drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleEngine {
    tuning: ScaleEngineTuning,
}

impl ScaleEngine {
    pub fn with_tuning(tuning: ScaleEngineTuning) -> ChartResult<Self> {
        Ok(Self {
            tuning: tuning.validate()?,
        })
    }

    #[must_use]
    pub fn tuning(self) -> ScaleEngineTuning {
        self.tuning
    }

    /// Builds the affine raw <-> pixel mapping for both axes.
    pub fn compute(
        self,
        bounds: DataBounds,
        area: DrawingArea,
        y_divisions: u32,
    ) -> ChartResult<AxisMapping> {
        if y_divisions == 0 {
            return Err(ChartError::InvalidGridDivisions);
        }
        if !area.is_valid() {
            return Err(ChartError::InvalidDrawingArea {
                width: area.width(),
                height: area.height(),
            });
        }
        if !bounds.is_finite() {
            return Err(ChartError::InvalidData(
                "data bounds must be finite".to_owned(),
            ));
        }

        // A single column still gets visible width.
        let (min_x, max_x) = if bounds.max_x == bounds.min_x {
            (bounds.min_x - 1.0, bounds.max_x + 1.0)
        } else {
            (bounds.min_x, bounds.max_x)
        };

        let range = nice_range(
            bounds.min_y,
            bounds.max_y,
            y_divisions,
            self.tuning.expansion_ratio,
        );

        let width = area.width();
        let height = area.height();
        let x_scale = width / (max_x - min_x);
        let x_translate = area.left - min_x * x_scale;
        let y_scale = height / range.span();
        let y_translate = range.min * y_scale + area.top;

        Ok(AxisMapping {
            x_scale,
            x_translate,
            y_scale,
            y_translate,
            height,
            min_x,
            max_x,
            nice_min_y: range.min,
            nice_max_y: range.max,
            granularity: range.granularity,
        })
    }
}

/// Affine mapping between raw data space and pixel space.
///
/// Pixel y grows downward, so the y axis is flipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisMapping {
    x_scale: f64,
    x_translate: f64,
    y_scale: f64,
    y_translate: f64,
    height: f64,
    min_x: f64,
    max_x: f64,
    nice_min_y: f64,
    nice_max_y: f64,
    granularity: f64,
}

impl AxisMapping {
    /// Computes a mapping with the default tuning.
    pub fn compute(bounds: DataBounds, area: DrawingArea, y_divisions: u32) -> ChartResult<Self> {
        ScaleEngine::default().compute(bounds, area, y_divisions)
    }

    #[must_use]
    pub fn scaled_x(&self, raw_x: f64) -> f64 {
        raw_x * self.x_scale + self.x_translate
    }

    #[must_use]
    pub fn scaled_y(&self, raw_y: f64) -> f64 {
        self.height - raw_y * self.y_scale + self.y_translate
    }

    #[must_use]
    pub fn raw_from_scaled_x(&self, scaled_x: f64) -> f64 {
        (scaled_x - self.x_translate) / self.x_scale
    }

    #[must_use]
    pub fn raw_from_scaled_y(&self, scaled_y: f64) -> f64 {
        (self.height + self.y_translate - scaled_y) / self.y_scale
    }

    #[must_use]
    pub fn x_scale(&self) -> f64 {
        self.x_scale
    }

    #[must_use]
    pub fn x_translate(&self) -> f64 {
        self.x_translate
    }

    #[must_use]
    pub fn y_scale(&self) -> f64 {
        self.y_scale
    }

    #[must_use]
    pub fn y_translate(&self) -> f64 {
        self.y_translate
    }

    /// Raw x range mapped onto the area, widened for single-column data.
    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }

    #[must_use]
    pub fn nice_min_y(&self) -> f64 {
        self.nice_min_y
    }

    #[must_use]
    pub fn nice_max_y(&self) -> f64 {
        self.nice_max_y
    }

    #[must_use]
    pub fn granularity(&self) -> f64 {
        self.granularity
    }
}
