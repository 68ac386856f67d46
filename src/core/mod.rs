pub mod data_source;
pub mod geometry;
pub mod labels;
pub mod nearest;
pub mod primitives;
pub mod scale;
pub mod types;
pub mod value_format;

pub use data_source::{DataSetEvent, DataSetNotifier, DataSource, SeriesData};
pub use geometry::{ChartGeometry, FillType, GeometryBuilder, GeometryOptions};
pub use labels::{
    EstimatedTextMeasurer, LabelAnchor, LabelLayout, LabelStyleGroup, TextBounds, TextMeasurer,
};
pub use nearest::nearest_index;
pub use scale::{AxisMapping, NiceRange, ScaleEngine, ScaleEngineTuning, nice_range};
pub use types::{DataBounds, DrawingArea, LineSegment, Padding, Point, Rect, Sample};
pub use value_format::{
    DecimalValueFormatter, PercentValueFormatter, ValueFormatter, format_trimmed_decimal,
};
