use serde::{Deserialize, Serialize};

use crate::core::types::{DrawingArea, Rect};

/// Text extents relative to the text origin (baseline start).
///
/// `top` is negative for glyphs rising above the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl TextBounds {
    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }
}

/// Measures label text for placement. Supplied by the rendering host.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextBounds;
}

/// Deterministic, backend-independent text size estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextBounds {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                _ => 0.58,
            }
        });
        TextBounds {
            left: 0.0,
            top: -0.72 * font_size_px,
            right: units * font_size_px,
            bottom: 0.0,
        }
    }
}

/// Margin and padding used when anchoring y-axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelLayout {
    pub margin_px: f64,
    pub padding_horizontal_px: f64,
    pub padding_vertical_px: f64,
    pub text_size_px: f64,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self {
            margin_px: 8.0,
            padding_horizontal_px: 6.0,
            padding_vertical_px: 3.0,
            text_size_px: 12.0,
        }
    }
}

/// Paint group a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelStyleGroup {
    Grid,
    ZeroLine,
}

/// Positioned label: background box plus text origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAnchor {
    pub text: String,
    pub value: f64,
    pub background: Rect,
    pub text_x: f64,
    pub text_y: f64,
    pub style: LabelStyleGroup,
}

/// Which area margin a label box hugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LabelEdge {
    Left,
    Right,
}

/// Where a family of labels sits relative to the drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LabelPlacement {
    pub(crate) area: DrawingArea,
    pub(crate) layout: LabelLayout,
    pub(crate) edge: LabelEdge,
    pub(crate) style: LabelStyleGroup,
}

impl LabelPlacement {
    /// Centers a label box vertically on `line_y`.
    pub(crate) fn place(
        &self,
        text: String,
        value: f64,
        line_y: f64,
        measurer: &dyn TextMeasurer,
    ) -> LabelAnchor {
        let layout = self.layout;
        let text_bounds = measurer.measure(&text, layout.text_size_px);
        let box_width = text_bounds.width() + layout.padding_horizontal_px * 2.0;
        let box_height = text_bounds.height() + layout.padding_vertical_px * 2.0;

        let left = match self.edge {
            LabelEdge::Left => self.area.left + layout.margin_px,
            LabelEdge::Right => self.area.right - layout.margin_px - box_width,
        };
        let top = line_y - text_bounds.height() / 2.0 - layout.padding_vertical_px;
        let background = Rect::new(left, top, left + box_width, top + box_height);

        LabelAnchor {
            text,
            value,
            text_x: background.left + layout.padding_horizontal_px - text_bounds.left,
            text_y: background.bottom - layout.padding_vertical_px - text_bounds.bottom,
            background,
            style: self.style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        EstimatedTextMeasurer, LabelEdge, LabelLayout, LabelPlacement, LabelStyleGroup,
        TextBounds, TextMeasurer,
    };
    use crate::core::types::DrawingArea;

    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, _text: &str, _font_size_px: f64) -> TextBounds {
            TextBounds {
                left: 1.0,
                top: -10.0,
                right: 31.0,
                bottom: 2.0,
            }
        }
    }

    fn layout() -> LabelLayout {
        LabelLayout {
            margin_px: 4.0,
            padding_horizontal_px: 5.0,
            padding_vertical_px: 2.0,
            text_size_px: 12.0,
        }
    }

    #[test]
    fn left_label_is_centered_on_its_line() {
        let area = DrawingArea::new(10.0, 0.0, 210.0, 100.0);
        let placement = LabelPlacement {
            area,
            layout: layout(),
            edge: LabelEdge::Left,
            style: LabelStyleGroup::Grid,
        };
        let label = placement.place("42".to_owned(), 42.0, 50.0, &FixedMeasurer);
        assert_eq!(label.background.left, 14.0);
        assert_eq!(label.background.right, 14.0 + 30.0 + 10.0);
        assert_eq!(label.background.top, 50.0 - 6.0 - 2.0);
        assert_eq!(label.background.bottom, 42.0 + 12.0 + 4.0);
        assert_eq!(label.background.center_y(), 50.0);
        assert_eq!(label.text_x, 14.0 + 5.0 - 1.0);
        assert_eq!(label.text_y, 58.0 - 2.0 - 2.0);
    }

    #[test]
    fn right_label_hugs_the_opposite_margin() {
        let area = DrawingArea::new(10.0, 0.0, 210.0, 100.0);
        let placement = LabelPlacement {
            area,
            layout: layout(),
            edge: LabelEdge::Right,
            style: LabelStyleGroup::ZeroLine,
        };
        let label = placement.place("0".to_owned(), 0.0, 20.0, &FixedMeasurer);
        assert_eq!(label.background.right, 206.0);
        assert_eq!(label.background.width(), 40.0);
        assert_eq!(label.style, LabelStyleGroup::ZeroLine);
    }

    #[test]
    fn estimate_grows_with_text_length() {
        let short = EstimatedTextMeasurer.measure("1", 10.0);
        let long = EstimatedTextMeasurer.measure("1000.5", 10.0);
        assert!(long.width() > short.width());
        assert_eq!(short.height(), long.height());
    }
}
