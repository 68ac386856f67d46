use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::ChartResult;

/// One chart-ordered sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_decimal(x: Decimal, y: Decimal) -> ChartResult<Self> {
        Ok(Self {
            x: decimal_to_f64(x, "x")?,
            y: decimal_to_f64(y, "y")?,
        })
    }
}

/// Tight bounding box of a data set in raw data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl DataBounds {
    /// Bounds of a data set without samples.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Accumulates bounds over `(x, y)` pairs, optionally seeded with a
    /// horizontal reference value so the base line is always visible.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>, reference: Option<f64>) -> Self {
        let mut bounds = Self::EMPTY;
        if let Some(reference) = reference {
            bounds.min_y = reference;
            bounds.max_y = reference;
        }
        for (x, y) in points {
            bounds.min_x = bounds.min_x.min(x);
            bounds.max_x = bounds.max_x.max(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_y = bounds.max_y.max(y);
        }
        bounds
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }
}

/// Padding of a host view around its drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub start: f64,
    pub top: f64,
    pub end: f64,
    pub bottom: f64,
}

impl Padding {
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self {
            start: value,
            top: value,
            end: value,
            bottom: value,
        }
    }
}

/// Pixel rectangle available for plotting, margins excluded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawingArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl DrawingArea {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Area of a `width` x `height` view once its padding is removed.
    #[must_use]
    pub fn from_view(width: f64, height: f64, padding: Padding) -> Self {
        Self {
            left: padding.start,
            top: padding.top,
            right: width - padding.end,
            bottom: height - padding.bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center_y(self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        let width = self.width();
        let height = self.height();
        width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
    }

    /// True for an area that has not been laid out yet: one dimension is
    /// zero and neither is negative.
    #[must_use]
    pub fn is_unsized(self) -> bool {
        let width = self.width();
        let height = self.height();
        (width == 0.0 && height >= 0.0) || (height == 0.0 && width >= 0.0)
    }
}

/// Vertex in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineSegment {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[must_use]
    pub fn horizontal(y: f64, area: DrawingArea) -> Self {
        Self::new(area.left, y, area.right, y)
    }

    #[must_use]
    pub fn vertical(x: f64, area: DrawingArea) -> Self {
        Self::new(x, area.top, x, area.bottom)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }
}

/// Axis-aligned pixel rectangle, used for label backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center_y(self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}
