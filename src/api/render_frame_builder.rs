use crate::core::{ChartGeometry, DrawingArea, LabelAnchor, LabelStyleGroup, LineSegment};
use crate::render::{
    Color, LinePrimitive, MarkerPrimitive, PolygonPrimitive, PolylinePrimitive, RectPrimitive,
    RenderFrame, TextHAlign, TextPrimitive,
};

use super::{ChartStyle, ScrubCursor};

/// Materializes geometry and style into draw primitives.
///
/// Line order is grid, baseline, zero line, then the scrub line.
pub(super) fn build_render_frame(
    area: DrawingArea,
    geometry: &ChartGeometry,
    style: &ChartStyle,
    font_size_px: f64,
    cursor: Option<ScrubCursor>,
    labels_dimmed: bool,
) -> RenderFrame {
    let mut frame = RenderFrame::new(area);
    if geometry.is_empty() {
        return frame;
    }

    let line = |segment: &LineSegment, width: f64, color: Color| {
        LinePrimitive::new(segment.x1, segment.y1, segment.x2, segment.y2, width, color)
    };

    for segment in geometry.grid_x.iter().chain(&geometry.grid_y) {
        frame
            .lines
            .push(line(segment, style.grid_line_width, style.grid_line_color));
    }
    if let Some(baseline) = &geometry.baseline {
        frame
            .lines
            .push(line(baseline, style.baseline_width, style.baseline_color));
    }
    if let Some(zero_line) = &geometry.zero_line {
        frame
            .lines
            .push(line(zero_line, style.zero_line_width, style.zero_line_color));
    }

    if let Some(fill) = &geometry.fill {
        frame.fills.push(PolygonPrimitive {
            points: fill.clone(),
            color: style.fill_color,
        });
    }
    frame.polylines.push(PolylinePrimitive {
        points: geometry.polyline.clone(),
        stroke_width: style.line_width,
        corner_radius: style.line_corner_radius,
        color: style.line_color,
    });

    if let Some(cursor) = cursor {
        frame.lines.push(line(
            &cursor.line,
            style.scrub_line_width,
            style.scrub_line_color,
        ));
        frame.markers.push(MarkerPrimitive {
            x: cursor.x,
            y: cursor.y,
            radius: style.scrub_cursor_radius,
            color: style.scrub_cursor_color,
        });
    }

    let alpha = if labels_dimmed {
        style.dimmed_label_alpha
    } else {
        1.0
    };
    for label in geometry.labels.iter().chain(&geometry.zero_label) {
        push_label(&mut frame, label, style, font_size_px, alpha);
    }

    frame
}

fn push_label(
    frame: &mut RenderFrame,
    label: &LabelAnchor,
    style: &ChartStyle,
    font_size_px: f64,
    alpha: f64,
) {
    let (text_color, background_color) = match label.style {
        LabelStyleGroup::Grid => (style.label_text_color, style.label_background_color),
        LabelStyleGroup::ZeroLine => (
            style.zero_label_text_color,
            style.zero_label_background_color,
        ),
    };
    frame.rects.push(RectPrimitive::new(
        label.background,
        style.label_background_radius,
        background_color.faded(alpha),
    ));
    if label.text.is_empty() {
        return;
    }
    frame.texts.push(TextPrimitive::new(
        label.text.clone(),
        label.text_x,
        label.text_y,
        font_size_px,
        text_color.faded(alpha),
        TextHAlign::Left,
    ));
}
