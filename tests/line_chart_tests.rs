use std::cell::RefCell;
use std::rc::Rc;

use linechart_rs::api::{ChartConfig, ChartStyle, ConfigChange, LineChart};
use linechart_rs::core::{DataBounds, DataSource, DrawingArea, FillType, SeriesData};
use linechart_rs::interaction::{PointerEvent, TouchResponse};
use linechart_rs::render::NullRenderer;
use linechart_rs::{ChartError, telemetry};

type Chart = LineChart<SeriesData<f64>, NullRenderer>;

fn area() -> DrawingArea {
    DrawingArea::new(0.0, 0.0, 100.0, 60.0)
}

fn sized_chart(config: ChartConfig) -> Chart {
    let series = SeriesData::from_values(vec![10.0, 28.0, 20.0]);
    let mut chart = LineChart::new(series, NullRenderer::default(), config).expect("chart init");
    chart.resize(area()).expect("resize");
    chart
}

fn record_scrubs(chart: &mut Chart) -> Rc<RefCell<Vec<Option<f64>>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    chart.set_scrub_listener(move |item: Option<&f64>| sink.borrow_mut().push(item.copied()));
    seen
}

#[test]
fn unsized_chart_has_no_geometry_and_renders_nothing() {
    let _ = telemetry::init_default_tracing();
    let series = SeriesData::from_values(vec![1.0, 2.0]);
    let mut chart = LineChart::new(series, NullRenderer::default(), ChartConfig::default())
        .expect("chart init");

    assert!(chart.geometry().is_empty());
    assert!(chart.axis_mapping().is_none());
    chart.render().expect("render");
    assert_eq!(chart.renderer().frames_rendered, 1);
    assert_eq!(chart.renderer().last_polyline_count, 0);
}

#[test]
fn resize_builds_geometry_and_zero_size_clears_it() {
    let mut chart = sized_chart(ChartConfig::default().with_grid_divisions(2, 3));
    assert_eq!(chart.scaled_x_points(), vec![0.0, 50.0, 100.0]);
    assert_eq!(chart.scaled_y_points(), vec![50.0, 14.0, 30.0]);
    assert!(chart.axis_mapping().is_some());

    chart
        .resize(DrawingArea::new(0.0, 0.0, 0.0, 60.0))
        .expect("zero size is not an error");
    assert!(chart.geometry().is_empty());
}

#[test]
fn negative_size_is_rejected() {
    let mut chart = sized_chart(ChartConfig::default());
    let result = chart.resize(DrawingArea::new(0.0, 0.0, -10.0, 60.0));
    assert!(matches!(result, Err(ChartError::InvalidDrawingArea { .. })));
    assert_eq!(chart.area(), area());
}

#[test]
fn zero_width_with_negative_height_is_rejected() {
    let mut chart = sized_chart(ChartConfig::default());
    let result = chart.resize(DrawingArea::new(0.0, 0.0, 0.0, -40.0));
    assert!(matches!(result, Err(ChartError::InvalidDrawingArea { .. })));
    assert_eq!(chart.area(), area());
    assert!(!chart.geometry().is_empty());

    let result = chart.resize(DrawingArea::new(0.0, 0.0, -40.0, 0.0));
    assert!(matches!(result, Err(ChartError::InvalidDrawingArea { .. })));
}

#[test]
fn data_events_recompute_or_clear_geometry() {
    let mut chart = sized_chart(ChartConfig::default());
    chart.source_mut().push(15.0);
    assert_eq!(chart.process_data_events().expect("events"), 1);
    assert_eq!(chart.geometry().len(), 4);

    chart.source_mut().notify_data_set_invalidated();
    chart.process_data_events().expect("events");
    assert!(chart.geometry().is_empty());

    chart.source_mut().notify_data_set_changed();
    chart.process_data_events().expect("events");
    assert_eq!(chart.geometry().len(), 4);
    assert_eq!(chart.process_data_events().expect("no events"), 0);
}

#[test]
fn scrub_reports_nearest_item_then_none() {
    let mut chart = sized_chart(ChartConfig::default().with_grid_divisions(0, 3));
    let seen = record_scrubs(&mut chart);

    assert_eq!(
        chart.handle_pointer(PointerEvent::down(48.0, 30.0, 0)),
        TouchResponse::ConsumedContinue
    );
    let timer = chart.pending_long_press().expect("timer");
    assert!(chart.fire_long_press(timer.id));

    let cursor = chart.scrub_cursor().expect("cursor");
    assert_eq!(cursor.index, 1);
    assert_eq!((cursor.x, cursor.y), (50.0, 14.0));
    assert!(chart.labels_dimmed());

    chart.handle_pointer(PointerEvent::moved(99.0, 30.0, 80));
    let cursor = chart.scrub_cursor().expect("cursor");
    assert_eq!(cursor.index, 2);
    // Default scrub line width is 2 px, so the line stops 1 px inside the edge.
    assert_eq!(cursor.line.x1, 99.0);

    assert_eq!(
        chart.handle_pointer(PointerEvent::up(99.0, 30.0, 120)),
        TouchResponse::ConsumedEnd
    );
    assert!(chart.scrub_cursor().is_none());
    assert!(!chart.labels_dimmed());
    assert_eq!(*seen.borrow(), vec![Some(28.0), Some(20.0), None]);
}

#[test]
fn data_change_mid_scrub_reports_the_resnapped_item() {
    let mut chart = sized_chart(ChartConfig::default().with_grid_divisions(0, 3));
    let seen = record_scrubs(&mut chart);

    chart.handle_pointer(PointerEvent::down(48.0, 30.0, 0));
    assert!(chart.poll_long_press(50));
    assert_eq!(chart.scrub_cursor().expect("cursor").index, 1);

    for value in [30.0, 31.0, 32.0, 33.0, 34.0, 35.0] {
        chart.source_mut().push(value);
    }
    chart.process_data_events().expect("events");

    // Nine samples over 100 px put sample 4 on the cursor column at x = 50.
    let cursor = chart.scrub_cursor().expect("cursor after push");
    assert_eq!(cursor.index, 4);
    assert_eq!(cursor.x, 50.0);
    assert_eq!(*seen.borrow(), vec![Some(28.0), Some(31.0)]);

    chart.source_mut().notify_data_set_changed();
    chart.process_data_events().expect("events");
    assert_eq!(seen.borrow().len(), 2);

    chart.source_mut().notify_data_set_invalidated();
    chart.process_data_events().expect("events");
    assert!(chart.scrub_cursor().is_none());
    assert!(!chart.labels_dimmed());
    assert_eq!(*seen.borrow(), vec![Some(28.0), Some(31.0), None]);
}

#[test]
fn disabling_scrub_before_long_press_stays_silent() {
    let base = ChartConfig::default().with_grid_divisions(0, 3);
    let mut chart = sized_chart(base);
    let seen = record_scrubs(&mut chart);

    chart.handle_pointer(PointerEvent::down(48.0, 30.0, 0));
    assert!(chart.pending_long_press().is_some());
    chart
        .set_config(base.with_scrub_enabled(false))
        .expect("disable scrub");
    assert!(chart.pending_long_press().is_none());
    assert!(seen.borrow().is_empty());

    chart.set_config(base).expect("enable scrub");
    chart.handle_pointer(PointerEvent::down(48.0, 30.0, 100));
    assert!(chart.poll_long_press(150));
    chart
        .set_config(base.with_scrub_enabled(false))
        .expect("disable scrub");
    assert!(chart.scrub_cursor().is_none());
    assert_eq!(*seen.borrow(), vec![Some(28.0), None]);
}

#[test]
fn long_press_timeout_follows_config() {
    let mut chart = sized_chart(
        ChartConfig::default()
            .with_grid_divisions(0, 3)
            .with_long_press_timeout_ms(120),
    );
    chart.handle_pointer(PointerEvent::down(48.0, 30.0, 0));
    assert_eq!(chart.pending_long_press().expect("timer").deadline_ms, 120);
    assert!(!chart.poll_long_press(60));
    assert!(chart.poll_long_press(120));
    assert!(chart.scrub_cursor().is_some());
}

#[test]
fn scrub_without_geometry_reports_no_item() {
    let series = SeriesData::from_values(vec![1.0, 2.0]);
    let mut chart = LineChart::new(series, NullRenderer::default(), ChartConfig::default())
        .expect("chart init");
    let seen = record_scrubs(&mut chart);

    chart.handle_pointer(PointerEvent::down(10.0, 10.0, 0));
    assert!(chart.poll_long_press(50));
    assert!(chart.scrub_cursor().is_none());
    chart.handle_pointer(PointerEvent::up(10.0, 10.0, 60));
    assert!(seen.borrow().iter().all(Option::is_none));
}

#[test]
fn render_emits_primitives_for_geometry_and_cursor() {
    let mut chart = sized_chart(ChartConfig::default().with_grid_divisions(2, 3));
    chart.render().expect("render");
    {
        let renderer = chart.renderer();
        assert_eq!(renderer.last_line_count, 5);
        assert_eq!(renderer.last_polyline_count, 1);
        assert_eq!(renderer.last_fill_count, 0);
        assert_eq!(renderer.last_text_count, 2);
        assert_eq!(renderer.last_marker_count, 0);
    }

    chart.handle_pointer(PointerEvent::down(10.0, 10.0, 0));
    chart.poll_long_press(60);
    chart.render().expect("render while scrubbing");
    assert_eq!(chart.renderer().last_line_count, 6);
    assert_eq!(chart.renderer().last_marker_count, 1);
}

#[test]
fn config_changes_are_classified() {
    let base = ChartConfig::default().with_grid_divisions(0, 3);
    let mut chart = sized_chart(base);

    assert_eq!(chart.set_config(base).expect("same"), ConfigChange::Unchanged);

    let restyled = base.with_style(ChartStyle::default().with_fill_color(
        linechart_rs::render::Color::rgba(0.1, 0.2, 0.3, 0.4),
    ));
    assert_eq!(chart.set_config(restyled).expect("style"), ConfigChange::Repaint);
    assert!(chart.geometry().fill.is_none());

    let filled = restyled.with_fill_type(FillType::Down);
    assert_eq!(chart.set_config(filled).expect("fill"), ConfigChange::Recompute);
    assert!(chart.geometry().fill.is_some());
}

#[test]
fn invalid_config_is_rejected_and_kept_out() {
    let mut chart = sized_chart(ChartConfig::default());
    let result = chart.set_config(ChartConfig::default().with_touch_slop_px(-1.0));
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
    assert_eq!(chart.config(), ChartConfig::default());
}

#[test]
fn disabled_scrub_ignores_pointer_input() {
    let mut chart = sized_chart(ChartConfig::default().with_scrub_enabled(false));
    assert_eq!(
        chart.handle_pointer(PointerEvent::down(10.0, 10.0, 0)),
        TouchResponse::NotConsumed
    );
    assert!(chart.pending_long_press().is_none());
}

#[test]
fn custom_formatter_relabels_the_axis() {
    let mut chart = sized_chart(ChartConfig::default().with_grid_divisions(0, 3));
    chart
        .set_value_formatter(|value: f64, _: DataBounds, _: u32| format!("${value}"))
        .expect("formatter");
    let texts: Vec<String> = chart
        .geometry()
        .labels
        .iter()
        .map(|label| label.text.clone())
        .collect();
    assert_eq!(texts, vec!["$15".to_owned(), "$25".to_owned()]);
    assert_eq!(chart.source().count(), 3);
}
