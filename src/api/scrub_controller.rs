use serde::{Deserialize, Serialize};

use crate::core::{ChartGeometry, DrawingArea, LineSegment, nearest_index};

/// Receives the data item under the scrub position, or `None` when the
/// scrub ends.
pub trait ScrubListener<T> {
    fn on_scrubbed(&mut self, item: Option<&T>);
}

impl<T, F> ScrubListener<T> for F
where
    F: FnMut(Option<&T>),
{
    fn on_scrubbed(&mut self, item: Option<&T>) {
        self(item)
    }
}

/// Scrub cursor snapped to the nearest sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrubCursor {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    /// Vertical scrub line, kept fully inside the area.
    pub line: LineSegment,
}

/// Resolves scrub positions to cursors and tracks label dimming.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(super) struct ScrubController {
    cursor: Option<ScrubCursor>,
    labels_dimmed: bool,
}

impl ScrubController {
    pub(super) fn cursor(&self) -> Option<ScrubCursor> {
        self.cursor
    }

    pub(super) fn labels_dimmed(&self) -> bool {
        self.labels_dimmed
    }

    /// Snaps `x` to the nearest sample. Returns `None` without geometry.
    pub(super) fn scrub_to(
        &mut self,
        x: f64,
        geometry: &ChartGeometry,
        area: DrawingArea,
        scrub_line_width: f64,
    ) -> Option<ScrubCursor> {
        let index = nearest_index(&geometry.scaled_x, x)?;
        let point = *geometry.polyline.get(index)?;
        let cursor = ScrubCursor {
            index,
            x: point.x,
            y: point.y,
            line: LineSegment::vertical(bounded_scrub_line_x(point.x, area, scrub_line_width), area),
        };
        self.cursor = Some(cursor);
        self.labels_dimmed = true;
        Some(cursor)
    }

    pub(super) fn end(&mut self) -> bool {
        let was_active = self.cursor.is_some() || self.labels_dimmed;
        self.cursor = None;
        self.labels_dimmed = false;
        was_active
    }
}

/// Clamps a scrub line so its full stroke stays inside the area.
pub(super) fn bounded_scrub_line_x(x: f64, area: DrawingArea, line_width: f64) -> f64 {
    let offset = line_width / 2.0;
    let left = area.left + offset;
    let right = area.right - offset;
    if x < left {
        left
    } else if x > right {
        right
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::bounded_scrub_line_x;
    use crate::core::DrawingArea;

    #[test]
    fn scrub_line_is_clamped_by_half_its_width() {
        let area = DrawingArea::new(10.0, 0.0, 110.0, 50.0);
        assert_eq!(bounded_scrub_line_x(10.0, area, 4.0), 12.0);
        assert_eq!(bounded_scrub_line_x(110.0, area, 4.0), 108.0);
        assert_eq!(bounded_scrub_line_x(60.0, area, 4.0), 60.0);
    }
}
