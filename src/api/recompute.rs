use crate::core::{
    ChartGeometry, DataSource, DrawingArea, GeometryBuilder, ScaleEngine, TextMeasurer,
    ValueFormatter,
};
use crate::error::{ChartError, ChartResult};

use super::ChartConfig;

/// Rebuilds chart geometry from scratch.
///
/// An unsized (zero width or height) area yields empty geometry; any other
/// non-positive or non-finite area is an error.
pub fn recompute<S>(
    config: &ChartConfig,
    source: &S,
    area: DrawingArea,
    formatter: &dyn ValueFormatter,
    measurer: &dyn TextMeasurer,
) -> ChartResult<ChartGeometry>
where
    S: DataSource + ?Sized,
{
    if area.is_unsized() {
        return Ok(ChartGeometry::empty());
    }
    if !area.is_valid() {
        return Err(ChartError::InvalidDrawingArea {
            width: area.width(),
            height: area.height(),
        });
    }

    let scale_engine = ScaleEngine::with_tuning(config.scale_tuning)?;
    GeometryBuilder::new(config.geometry_options())
        .with_scale_engine(scale_engine)
        .build(source, area, formatter, measurer)
}
