use linechart_rs::core::{
    ChartGeometry, DataBounds, DecimalValueFormatter, DrawingArea, EstimatedTextMeasurer,
    FillType, GeometryBuilder, GeometryOptions, LabelLayout, LabelStyleGroup, Point, SeriesData,
    TextBounds, TextMeasurer,
};
use linechart_rs::ChartError;

struct FixedMeasurer;

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, _text: &str, _font_size_px: f64) -> TextBounds {
        TextBounds {
            left: 0.0,
            top: -8.0,
            right: 20.0,
            bottom: 0.0,
        }
    }
}

fn options(fill_type: FillType, grid_x: u32, grid_y: u32) -> GeometryOptions {
    GeometryOptions {
        fill_type,
        grid_x_divisions: grid_x,
        grid_y_divisions: grid_y,
        zero_line_enabled: true,
        label_layout: LabelLayout {
            margin_px: 4.0,
            padding_horizontal_px: 2.0,
            padding_vertical_px: 1.0,
            text_size_px: 10.0,
        },
    }
}

fn build(series: &SeriesData<f64>, options: GeometryOptions, area: DrawingArea) -> ChartGeometry {
    GeometryBuilder::new(options)
        .build(series, area, &DecimalValueFormatter::default(), &FixedMeasurer)
        .expect("geometry")
}

// [10, 28, 20] with three bands ranges to [5, 35] over a 100x60 area.
fn rising_series() -> SeriesData<f64> {
    SeriesData::from_values(vec![10.0, 28.0, 20.0])
}

fn small_area() -> DrawingArea {
    DrawingArea::new(0.0, 0.0, 100.0, 60.0)
}

#[test]
fn fewer_than_two_samples_yield_empty_geometry() {
    for values in [vec![], vec![4.0]] {
        let series = SeriesData::from_values(values);
        let geometry = build(&series, options(FillType::Down, 2, 2), small_area());
        assert!(geometry.is_empty());
        assert_eq!(geometry, ChartGeometry::empty());
    }
}

#[test]
fn polyline_scales_every_sample_in_order() {
    let geometry = build(&rising_series(), options(FillType::None, 0, 3), small_area());
    assert_eq!(
        geometry.polyline,
        vec![
            Point::new(0.0, 50.0),
            Point::new(50.0, 14.0),
            Point::new(100.0, 30.0),
        ]
    );
    assert_eq!(geometry.scaled_x, vec![0.0, 50.0, 100.0]);
    assert_eq!(geometry.scaled_y, vec![50.0, 14.0, 30.0]);
    assert!(geometry.fill.is_none());
}

#[test]
fn fill_policies_close_against_their_edge() {
    let series = rising_series();
    let down = build(&series, options(FillType::Down, 0, 3), small_area());
    let up = build(&series, options(FillType::Up, 0, 3), small_area());
    let toward_zero = build(&series, options(FillType::TowardZero, 0, 3), small_area());

    let down_fill = down.fill.expect("down fill");
    assert_eq!(down_fill.len(), 6);
    assert_eq!(down_fill[3], Point::new(100.0, 60.0));
    assert_eq!(down_fill[4], Point::new(0.0, 60.0));
    assert_eq!(down_fill[5], Point::new(0.0, 50.0));

    let up_fill = up.fill.expect("up fill");
    assert_eq!(up_fill[3], Point::new(100.0, 0.0));
    assert_eq!(up_fill[4], Point::new(0.0, 0.0));

    // Zero sits below the visible area, so the fill stops at the bottom edge.
    assert_eq!(toward_zero.fill, Some(down_fill));
}

#[test]
fn toward_zero_fill_meets_the_zero_row_when_data_crosses_zero() {
    // [-10, 10] with four bands ranges to [-20, 20]; zero is the middle row.
    let series = SeriesData::from_values(vec![-10.0, 10.0]);
    let area = DrawingArea::new(0.0, 0.0, 100.0, 100.0);
    let geometry = build(&series, options(FillType::TowardZero, 0, 4), area);

    let fill = geometry.fill.expect("fill");
    assert_eq!(fill[2], Point::new(100.0, 50.0));
    assert_eq!(fill[3], Point::new(0.0, 50.0));
}

#[test]
fn grid_lines_cover_the_area() {
    let geometry = build(&rising_series(), options(FillType::None, 4, 3), small_area());

    let xs: Vec<f64> = geometry.grid_x.iter().map(|line| line.x1).collect();
    assert_eq!(xs, vec![0.0, 25.0, 50.0, 75.0]);
    assert!(geometry.grid_x.iter().all(|line| line.y1 == 0.0 && line.y2 == 60.0));

    let ys: Vec<f64> = geometry.grid_y.iter().map(|line| line.y1).collect();
    assert_eq!(ys, vec![40.0, 20.0, 0.0]);
    assert!(geometry.grid_y.iter().all(|line| line.x1 == 0.0 && line.x2 == 100.0));
}

#[test]
fn labels_skip_the_top_grid_line() {
    let geometry = build(&rising_series(), options(FillType::None, 0, 3), small_area());

    let texts: Vec<&str> = geometry.labels.iter().map(|label| label.text.as_str()).collect();
    assert_eq!(texts, vec!["15", "25"]);
    for (label, line) in geometry.labels.iter().zip(&geometry.grid_y) {
        assert_eq!(label.style, LabelStyleGroup::Grid);
        assert_eq!(label.background.left, 4.0);
        assert_eq!(label.background.right, 4.0 + 20.0 + 4.0);
        assert_eq!(label.background.center_y(), line.y1);
    }
}

#[test]
fn formatter_receives_bounds_and_divisions() {
    let series = rising_series();
    let formatter = |value: f64, bounds: DataBounds, divisions: u32| {
        format!("{value}/{}/{divisions}", bounds.max_y)
    };
    let geometry = GeometryBuilder::new(options(FillType::None, 0, 3))
        .build(&series, small_area(), &formatter, &EstimatedTextMeasurer)
        .expect("geometry");
    assert_eq!(geometry.labels[0].text, "15/28/3");
}

#[test]
fn zero_line_and_label_only_when_data_goes_negative() {
    let area = DrawingArea::new(0.0, 0.0, 100.0, 100.0);
    let negative = SeriesData::from_values(vec![-10.0, 10.0]);
    let geometry = build(&negative, options(FillType::None, 0, 4), area);

    let zero_line = geometry.zero_line.expect("zero line");
    assert_eq!(zero_line.y1, 50.0);
    let zero_label = geometry.zero_label.expect("zero label");
    assert_eq!(zero_label.value, 0.0);
    assert_eq!(zero_label.text, "0");
    assert_eq!(zero_label.style, LabelStyleGroup::ZeroLine);
    assert_eq!(zero_label.background.right, 96.0);

    let texts: Vec<&str> = geometry.labels.iter().map(|label| label.text.as_str()).collect();
    assert_eq!(texts, vec!["-10", "0", "10"]);

    let positive = build(&rising_series(), options(FillType::None, 0, 3), small_area());
    assert!(positive.zero_line.is_none());
    assert!(positive.zero_label.is_none());

    let mut disabled = options(FillType::None, 0, 4);
    disabled.zero_line_enabled = false;
    let geometry = build(&negative, disabled, area);
    assert!(geometry.zero_line.is_none());
}

#[test]
fn baseline_follows_the_reference_line() {
    let series = rising_series().with_reference_line(Some(20.0));
    let geometry = build(&series, options(FillType::None, 0, 3), small_area());
    let baseline = geometry.baseline.expect("baseline");
    assert_eq!(baseline.y1, 30.0);
    assert_eq!(baseline.x1, 0.0);
    assert_eq!(baseline.x2, 100.0);
}

#[test]
fn no_horizontal_grid_ranges_a_single_band() {
    let geometry = build(&rising_series(), options(FillType::None, 0, 0), small_area());
    let mapping = geometry.mapping.expect("mapping");
    assert_eq!(mapping.nice_min_y(), 5.0);
    assert_eq!(mapping.nice_max_y(), 30.0);
    assert!(geometry.grid_y.is_empty());
    assert!(geometry.labels.is_empty());
}

#[test]
fn non_finite_samples_are_rejected() {
    let series = SeriesData::from_values(vec![1.0, f64::NAN, 3.0]);
    let result = GeometryBuilder::new(options(FillType::None, 0, 2)).build(
        &series,
        small_area(),
        &DecimalValueFormatter::default(),
        &EstimatedTextMeasurer,
    );
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
}
