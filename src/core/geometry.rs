use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::data_source::DataSource;
use crate::core::labels::{
    LabelAnchor, LabelEdge, LabelLayout, LabelPlacement, LabelStyleGroup, TextMeasurer,
};
use crate::core::scale::{AxisMapping, ScaleEngine};
use crate::core::types::{DataBounds, DrawingArea, LineSegment, Point};
use crate::core::value_format::ValueFormatter;
use crate::error::{ChartError, ChartResult};

/// Projection above which the `parallel-projection` feature switches to rayon.
#[cfg(feature = "parallel-projection")]
const PARALLEL_PROJECTION_MIN_SAMPLES: usize = 4_096;

/// Region shaded between the polyline and an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillType {
    #[default]
    None,
    /// Fill toward the top of the area.
    Up,
    /// Fill toward the bottom of the area.
    Down,
    /// Fill toward the zero row, clamped to the visible area.
    TowardZero,
}

impl FillType {
    /// Maps the legacy integer codes `0..=3`.
    ///
    /// # Panics
    ///
    /// Panics on any other code.
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::None,
            1 => Self::Up,
            2 => Self::Down,
            3 => Self::TowardZero,
            other => panic!("unknown fill type code: {other}"),
        }
    }

    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Up => 1,
            Self::Down => 2,
            Self::TowardZero => 3,
        }
    }

    #[must_use]
    pub fn is_fill(self) -> bool {
        self != Self::None
    }

    fn edge(self, mapping: &AxisMapping, area: DrawingArea) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Up => Some(area.top),
            Self::Down => Some(area.bottom),
            Self::TowardZero => Some(mapping.scaled_y(0.0).clamp(area.top, area.bottom)),
        }
    }
}

/// Inputs of a geometry build that come from chart configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryOptions {
    pub fill_type: FillType,
    pub grid_x_divisions: u32,
    pub grid_y_divisions: u32,
    pub zero_line_enabled: bool,
    pub label_layout: LabelLayout,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            fill_type: FillType::None,
            grid_x_divisions: 0,
            grid_y_divisions: 0,
            zero_line_enabled: false,
            label_layout: LabelLayout::default(),
        }
    }
}

/// Everything a renderer needs to paint one chart state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub mapping: Option<AxisMapping>,
    pub bounds: Option<DataBounds>,
    pub polyline: Vec<Point>,
    pub fill: Option<Vec<Point>>,
    pub grid_x: Vec<LineSegment>,
    pub grid_y: Vec<LineSegment>,
    pub baseline: Option<LineSegment>,
    pub zero_line: Option<LineSegment>,
    pub labels: Vec<LabelAnchor>,
    pub zero_label: Option<LabelAnchor>,
    pub scaled_x: Vec<f64>,
    pub scaled_y: Vec<f64>,
}

impl ChartGeometry {
    /// Geometry of a chart with nothing to draw.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            mapping: None,
            bounds: None,
            polyline: Vec::new(),
            fill: None,
            grid_x: Vec::new(),
            grid_y: Vec::new(),
            baseline: None,
            zero_line: None,
            labels: Vec::new(),
            zero_label: None,
            scaled_x: Vec::new(),
            scaled_y: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_none()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.polyline.len()
    }
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self::empty()
    }
}

/// Builds [`ChartGeometry`] from a data source and a drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryBuilder {
    options: GeometryOptions,
    scale_engine: ScaleEngine,
}

impl GeometryBuilder {
    #[must_use]
    pub fn new(options: GeometryOptions) -> Self {
        Self {
            options,
            scale_engine: ScaleEngine::default(),
        }
    }

    #[must_use]
    pub fn with_scale_engine(mut self, scale_engine: ScaleEngine) -> Self {
        self.scale_engine = scale_engine;
        self
    }

    #[must_use]
    pub fn options(&self) -> GeometryOptions {
        self.options
    }

    pub fn build<S>(
        &self,
        source: &S,
        area: DrawingArea,
        formatter: &dyn ValueFormatter,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<ChartGeometry>
    where
        S: DataSource + ?Sized,
    {
        let count = source.count();
        if count < 2 {
            return Ok(ChartGeometry::empty());
        }

        let bounds = source.bounds();
        let options = self.options;
        let mapping = self
            .scale_engine
            .compute(bounds, area, options.grid_y_divisions.max(1))?;

        let raw: Vec<(f64, f64)> = (0..count)
            .map(|index| (source.x(index), source.y(index)))
            .collect();
        if raw.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(ChartError::InvalidData(
                "sample values must be finite".to_owned(),
            ));
        }
        let polyline = project_polyline(&raw, &mapping);

        let fill = options
            .fill_type
            .edge(&mapping, area)
            .map(|edge| fill_boundary(&polyline, edge, area));

        let grid_x = vertical_grid(area, options.grid_x_divisions);
        let grid_y = horizontal_grid(area, options.grid_y_divisions);

        let baseline = source
            .reference_line()
            .map(|value| LineSegment::horizontal(mapping.scaled_y(value), area));

        let zero_y = mapping.scaled_y(0.0);
        let zero_line = (options.zero_line_enabled && bounds.min_y < 0.0)
            .then(|| LineSegment::horizontal(zero_y, area));

        // The last horizontal line is the top edge and stays unlabeled.
        let labeled_lines = grid_y.len().saturating_sub(1);
        let grid_labels = LabelPlacement {
            area,
            layout: options.label_layout,
            edge: LabelEdge::Left,
            style: LabelStyleGroup::Grid,
        };
        let labels: Vec<LabelAnchor> = grid_y
            .iter()
            .take(labeled_lines)
            .map(|line| {
                let value = mapping.raw_from_scaled_y(line.y1);
                grid_labels.place(
                    formatter.format(value, bounds, options.grid_y_divisions),
                    value,
                    line.y1,
                    measurer,
                )
            })
            .collect();

        let zero_label = zero_line.map(|_| {
            let placement = LabelPlacement {
                area,
                layout: options.label_layout,
                edge: LabelEdge::Right,
                style: LabelStyleGroup::ZeroLine,
            };
            placement.place(
                formatter.format(0.0, bounds, options.grid_y_divisions),
                0.0,
                zero_y,
                measurer,
            )
        });

        debug!(
            count,
            nice_min_y = mapping.nice_min_y(),
            nice_max_y = mapping.nice_max_y(),
            fill = ?options.fill_type,
            labels = labels.len(),
            "built chart geometry"
        );

        Ok(ChartGeometry {
            scaled_x: polyline.iter().map(|point| point.x).collect(),
            scaled_y: polyline.iter().map(|point| point.y).collect(),
            mapping: Some(mapping),
            bounds: Some(bounds),
            polyline,
            fill,
            grid_x,
            grid_y,
            baseline,
            zero_line,
            labels,
            zero_label,
        })
    }
}

fn project_polyline(raw: &[(f64, f64)], mapping: &AxisMapping) -> Vec<Point> {
    let project = |&(x, y): &(f64, f64)| Point::new(mapping.scaled_x(x), mapping.scaled_y(y));

    #[cfg(feature = "parallel-projection")]
    {
        if raw.len() >= PARALLEL_PROJECTION_MIN_SAMPLES {
            return raw.par_iter().map(project).collect();
        }
    }

    raw.iter().map(project).collect()
}

/// Closed fill polygon: polyline, down (or up) to `edge`, back to the area's
/// left side, then the first vertex again.
fn fill_boundary(polyline: &[Point], edge: f64, area: DrawingArea) -> Vec<Point> {
    let (Some(first), Some(last)) = (polyline.first(), polyline.last()) else {
        return Vec::new();
    };
    let mut boundary = Vec::with_capacity(polyline.len() + 3);
    boundary.extend_from_slice(polyline);
    boundary.push(Point::new(last.x, edge));
    boundary.push(Point::new(area.left, edge));
    boundary.push(*first);
    boundary
}

fn vertical_grid(area: DrawingArea, divisions: u32) -> Vec<LineSegment> {
    if divisions == 0 {
        return Vec::new();
    }
    let step = area.width() / f64::from(divisions);
    (0..divisions)
        .map(|index| LineSegment::vertical(area.left + f64::from(index) * step, area))
        .collect()
}

/// Horizontal lines from just above the bottom edge up to the top edge.
fn horizontal_grid(area: DrawingArea, divisions: u32) -> Vec<LineSegment> {
    if divisions == 0 {
        return Vec::new();
    }
    let step = area.height() / f64::from(divisions);
    (0..divisions)
        .map(|index| LineSegment::horizontal(area.bottom - f64::from(index + 1) * step, area))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{FillType, fill_boundary, horizontal_grid, vertical_grid};
    use crate::core::types::{DrawingArea, Point};

    fn area() -> DrawingArea {
        DrawingArea::new(0.0, 0.0, 100.0, 50.0)
    }

    #[test]
    fn fill_codes_map_both_ways() {
        for code in 0..=3 {
            assert_eq!(FillType::from_code(code).code(), code);
        }
        assert!(!FillType::None.is_fill());
        assert!(FillType::TowardZero.is_fill());
    }

    #[test]
    #[should_panic(expected = "unknown fill type code")]
    fn unknown_fill_code_panics() {
        let _ = FillType::from_code(7);
    }

    #[test]
    fn horizontal_grid_runs_bottom_to_top() {
        let lines = horizontal_grid(area(), 5);
        let ys: Vec<f64> = lines.iter().map(|line| line.y1).collect();
        assert_eq!(ys, vec![40.0, 30.0, 20.0, 10.0, 0.0]);
    }

    #[test]
    fn vertical_grid_starts_at_left_edge() {
        let lines = vertical_grid(area(), 4);
        let xs: Vec<f64> = lines.iter().map(|line| line.x1).collect();
        assert_eq!(xs, vec![0.0, 25.0, 50.0, 75.0]);
        assert!(vertical_grid(area(), 0).is_empty());
    }

    #[test]
    fn fill_boundary_closes_on_first_vertex() {
        let polyline = [Point::new(10.0, 20.0), Point::new(90.0, 5.0)];
        let boundary = fill_boundary(&polyline, 50.0, area());
        assert_eq!(
            boundary,
            vec![
                Point::new(10.0, 20.0),
                Point::new(90.0, 5.0),
                Point::new(90.0, 50.0),
                Point::new(0.0, 50.0),
                Point::new(10.0, 20.0),
            ]
        );
    }
}
